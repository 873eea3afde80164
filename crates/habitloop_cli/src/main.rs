//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `habitloop_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe validating core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("habitloop_core ping={}", habitloop_core::ping());
    println!("habitloop_core version={}", habitloop_core::core_version());
}
