//! Domain model for habit tracking.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every domain object is identified by a stable `HabitId`.
//! - Completion state is a set of day buckets, never raw timestamps.

pub mod habit;
