//! Flutter-facing FFI crate for Habitloop.
//!
//! # Responsibility
//! - Expose the core habit store to Dart through `flutter_rust_bridge`.
//! - Keep the boundary panic-free and string-diagnosable.

pub mod api;
