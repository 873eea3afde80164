//! Day discretization and streak arithmetic.
//!
//! # Responsibility
//! - Map instants to integer day identifiers under the active policy.
//! - Count consecutive-completion streaks over day sets.
//!
//! # Invariants
//! - The fixed-window bucket policy is the single authoritative encoding.
//! - Calendar `yyyyMMdd` keys exist only as a decode source for the one-way
//!   legacy-data migration; they never leave the migration path.

pub mod bucket;
pub mod key;
pub mod streak;
