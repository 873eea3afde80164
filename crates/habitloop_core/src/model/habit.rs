//! Habit domain model.
//!
//! # Responsibility
//! - Define the canonical habit record tracked across days.
//! - Provide completion-set mutators used by the store layer.
//!
//! # Invariants
//! - `id` is stable and never reused for another habit.
//! - `name` is never empty or whitespace-only once stored.
//! - `completion_days` holds fixed-window day buckets only; calendar-style
//!   keys (>= 1_000_000) must be migrated before they reach this model.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a habit.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type HabitId = Uuid;

/// First integer that reads as a calendar `yyyyMMdd` key rather than a
/// day bucket. Buckets stay far below this bound for millennia.
pub const MAX_DAY_BUCKET: i64 = 1_000_000;

/// Validation failures for habit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitValidationError {
    /// Habit id is the nil UUID.
    NilId,
    /// Name is empty or whitespace-only after trimming.
    EmptyName,
    /// A completion day is outside the valid bucket range.
    InvalidCompletionDay(i64),
}

impl Display for HabitValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "habit id must not be nil"),
            Self::EmptyName => write!(f, "habit name cannot be empty"),
            Self::InvalidCompletionDay(day) => {
                write!(f, "completion day {day} is not a valid day bucket")
            }
        }
    }
}

impl Error for HabitValidationError {}

/// Canonical habit record.
///
/// The persistence layer owns the stored copy; callers hold this aggregate
/// only transiently while performing a store operation, never as a
/// long-lived cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Stable global ID used for linking and FFI addressing.
    pub id: HabitId,
    /// Trimmed display name. Mutable via `rename` only.
    pub name: String,
    /// Unix epoch milliseconds at creation. Used only for list ordering.
    pub created_at: i64,
    /// Completed day buckets. Set semantics, insertion order irrelevant.
    pub completion_days: BTreeSet<i64>,
}

impl Habit {
    /// Creates a new habit with a generated ID, the current creation time
    /// and an empty completion set.
    ///
    /// # Errors
    /// - `EmptyName` when `name` trims to an empty string.
    pub fn new(name: impl Into<String>) -> Result<Self, HabitValidationError> {
        Self::with_id(Uuid::new_v4(), name, Utc::now().timestamp_millis())
    }

    /// Creates a habit with caller-provided identity and creation time.
    ///
    /// Used by persistence reads and tests where identity already exists.
    ///
    /// # Errors
    /// - `NilId` when `id` is the nil UUID.
    /// - `EmptyName` when `name` trims to an empty string.
    pub fn with_id(
        id: HabitId,
        name: impl Into<String>,
        created_at: i64,
    ) -> Result<Self, HabitValidationError> {
        let trimmed = name.into().trim().to_string();
        let habit = Self {
            id,
            name: trimmed,
            created_at,
            completion_days: BTreeSet::new(),
        };
        habit.validate()?;
        Ok(habit)
    }

    /// Validates stored-state invariants.
    pub fn validate(&self) -> Result<(), HabitValidationError> {
        if self.id.is_nil() {
            return Err(HabitValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(HabitValidationError::EmptyName);
        }
        for &day in &self.completion_days {
            if !(0..MAX_DAY_BUCKET).contains(&day) {
                return Err(HabitValidationError::InvalidCompletionDay(day));
            }
        }
        Ok(())
    }

    /// Replaces the name after trimming.
    ///
    /// # Errors
    /// - `EmptyName` when `name` trims to an empty string.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), HabitValidationError> {
        let trimmed = name.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(HabitValidationError::EmptyName);
        }
        self.name = trimmed;
        Ok(())
    }

    /// Inserts a completed day bucket. Returns whether the set changed.
    pub fn mark_completed(&mut self, day: i64) -> bool {
        self.completion_days.insert(day)
    }

    /// Removes a completed day bucket. Returns whether the set changed.
    pub fn clear_completed(&mut self, day: i64) -> bool {
        self.completion_days.remove(&day)
    }

    /// Returns whether the given day bucket is marked complete.
    pub fn is_completed(&self, day: i64) -> bool {
        self.completion_days.contains(&day)
    }
}
