//! Habit use-case store.
//!
//! # Responsibility
//! - Validate and mutate habit aggregates (create, rename, delete,
//!   toggle-today) through repository persistence.
//! - Derive the streak metric and recent-history window as pure queries.
//! - Notify subscribers after each successful mutation.
//!
//! # Invariants
//! - Every mutating operation persists synchronously before returning and
//!   before any change event is emitted.
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Single-threaded execution model: callers serialize operations on the
//!   UI sequencing context, so no locking is defined here.

use crate::day::{bucket, streak};
use crate::model::habit::{Habit, HabitId};
use crate::repo::habit_repo::{HabitRepository, RepoResult};
use chrono::{DateTime, Utc};

/// Change event emitted after a successful mutation.
///
/// Replaces the implicit view-refresh reactivity of the original UI
/// framework with an explicit contract: subscribers re-query on event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Created(HabitId),
    Renamed(HabitId),
    Deleted(HabitId),
    CompletionChanged {
        id: HabitId,
        day: i64,
        completed: bool,
    },
}

type ChangeListener = Box<dyn Fn(&StoreEvent)>;

/// Use-case store for habit operations.
///
/// On persistence failure the in-memory aggregate may already reflect the
/// attempted mutation; callers must treat the operation as not having
/// happened and reload from storage.
pub struct HabitService<R: HabitRepository> {
    repo: R,
    listeners: Vec<ChangeListener>,
}

impl<R: HabitRepository> HabitService<R> {
    /// Creates a store using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            listeners: Vec::new(),
        }
    }

    /// Registers a change listener invoked after each successful mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&StoreEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // Commands

    /// Creates and persists a new habit with an empty completion set.
    ///
    /// # Errors
    /// - `Validation(EmptyName)` when `name` trims to empty; nothing is
    ///   stored in that case.
    pub fn create_habit(&self, name: &str) -> RepoResult<Habit> {
        let habit = Habit::new(name)?;
        self.repo.insert_habit(&habit)?;
        self.emit(StoreEvent::Created(habit.id));
        Ok(habit)
    }

    /// Renames a habit after validation and persists it.
    ///
    /// # Errors
    /// - `Validation(EmptyName)` when `name` trims to empty; the aggregate
    ///   is left unchanged in that case.
    pub fn rename_habit(&self, habit: &mut Habit, name: &str) -> RepoResult<()> {
        habit.rename(name)?;
        self.repo.update_habit(habit)?;
        self.emit(StoreEvent::Renamed(habit.id));
        Ok(())
    }

    /// Deletes a habit record and its completion history.
    pub fn delete_habit(&self, habit: &Habit) -> RepoResult<()> {
        self.repo.remove_habit(habit.id)?;
        self.emit(StoreEvent::Deleted(habit.id));
        Ok(())
    }

    /// Marks the current day bucket complete if it is not already.
    ///
    /// Returns `true` when today's bucket was inserted and persisted,
    /// `false` when it was already present (idempotent no-op, nothing is
    /// written). Insert-only by design: tapping an already-done habit is
    /// not an undo; see `set_completed` for the explicit undo path.
    pub fn toggle_today(&self, habit: &mut Habit) -> RepoResult<bool> {
        self.set_completed(habit, bucket::today(), true)
    }

    /// Explicitly sets or clears completion for one day bucket.
    ///
    /// Returns whether the completion set changed; no-ops are not
    /// persisted and emit no event.
    pub fn set_completed(&self, habit: &mut Habit, day: i64, done: bool) -> RepoResult<bool> {
        let changed = if done {
            habit.mark_completed(day)
        } else {
            habit.clear_completed(day)
        };

        if !changed {
            return Ok(false);
        }

        self.repo.update_habit(habit)?;
        self.emit(StoreEvent::CompletionChanged {
            id: habit.id,
            day,
            completed: done,
        });
        Ok(true)
    }

    // Queries

    /// Current streak counting back from the present instant.
    pub fn streak(&self, habit: &Habit) -> u32 {
        self.streak_at(habit, Utc::now())
    }

    /// Streak counting back from the bucket containing `reference`.
    pub fn streak_at(&self, habit: &Habit, reference: DateTime<Utc>) -> u32 {
        streak::streak(&habit.completion_days, bucket::bucket_for(reference))
    }

    /// Completion flags for the trailing `len` buckets ending today,
    /// oldest first.
    pub fn recent_history(&self, habit: &Habit, len: usize) -> Vec<bool> {
        streak::recent_history(&habit.completion_days, len, bucket::today())
    }

    /// Gets one habit by stable ID.
    pub fn get_habit(&self, id: HabitId) -> RepoResult<Option<Habit>> {
        self.repo.get_habit(id)
    }

    /// Lists all habits ordered by creation time, oldest first.
    pub fn list_habits(&self) -> RepoResult<Vec<Habit>> {
        self.repo.list_habits()
    }

    fn emit(&self, event: StoreEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }
}
