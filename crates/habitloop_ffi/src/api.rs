//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple for the UI layer: envelope structs with
//!   `ok` + human-readable `message`, never exceptions.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The UI owns no business logic; it calls these functions on user
//!   gestures (tap-to-toggle, swipe-to-delete, form submit) and re-queries
//!   `habit_list` after any successful mutation.

use habitloop_core::db::open_db;
use habitloop_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    HabitId, HabitService, SqliteHabitRepository,
};
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const RECENT_HISTORY_LEN: usize = 7;
const HABIT_DB_FILE_NAME: &str = "habitloop.sqlite3";
static HABIT_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One habit row for the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitListItem {
    /// Stable habit ID in string form.
    pub habit_id: String,
    /// Trimmed display name.
    pub name: String,
    /// Current consecutive-day streak.
    pub streak: u32,
    /// Whether today's bucket is already complete.
    pub completed_today: bool,
    /// Completion flags for the trailing week, oldest first.
    pub recent_days: Vec<bool>,
}

/// Response envelope for the habit list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitListResponse {
    /// Habits ordered by creation time (empty on failure).
    pub items: Vec<HabitListItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for habit mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Optional affected habit ID.
    pub habit_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl HabitActionResponse {
    fn success(message: impl Into<String>, habit_id: String) -> Self {
        Self {
            ok: true,
            habit_id: Some(habit_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            habit_id: None,
            message: message.into(),
        }
    }
}

/// Response envelope for tap-to-toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleTodayResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// `true` when today's completion was newly added; `false` when today
    /// was already complete (idempotent repeat tap).
    pub added: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Lists all habits with streak and recent-history projections.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures return an empty list plus a message.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_list() -> HabitListResponse {
    let listed = with_store(|store| {
        let habits = store.list_habits().map_err(|err| err.to_string())?;
        let items = habits
            .iter()
            .map(|habit| HabitListItem {
                habit_id: habit.id.to_string(),
                name: habit.name.clone(),
                streak: store.streak(habit),
                completed_today: habit.is_completed(habitloop_core::day::bucket::today()),
                recent_days: store.recent_history(habit, RECENT_HISTORY_LEN),
            })
            .collect::<Vec<_>>();
        Ok(items)
    });

    match listed {
        Ok(items) => {
            let message = if items.is_empty() {
                "No habits yet.".to_string()
            } else {
                format!("Found {} habit(s).", items.len())
            };
            HabitListResponse { items, message }
        }
        Err(err) => HabitListResponse {
            items: Vec::new(),
            message: format!("habit_list failed: {err}"),
        },
    }
}

/// Creates a habit from the add-habit form.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Empty or whitespace-only names fail with a validation message and
///   store nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_create(name: String) -> HabitActionResponse {
    match with_store(|store| store.create_habit(&name).map_err(|err| err.to_string())) {
        Ok(habit) => HabitActionResponse::success("Habit created.", habit.id.to_string()),
        Err(err) => HabitActionResponse::failure(format!("habit_create failed: {err}")),
    }
}

/// Renames a habit from the edit form.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_rename(habit_id: String, name: String) -> HabitActionResponse {
    let result = with_habit(&habit_id, |store, habit| {
        store
            .rename_habit(habit, &name)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(()) => HabitActionResponse::success("Habit renamed.", habit_id),
        Err(err) => HabitActionResponse::failure(format!("habit_rename failed: {err}")),
    }
}

/// Deletes a habit (swipe-to-delete).
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Removes the record and its completion history permanently.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_delete(habit_id: String) -> HabitActionResponse {
    let result = with_habit(&habit_id, |store, habit| {
        store.delete_habit(habit).map_err(|err| err.to_string())
    });
    match result {
        Ok(()) => HabitActionResponse::success("Habit deleted.", habit_id),
        Err(err) => HabitActionResponse::failure(format!("habit_delete failed: {err}")),
    }
}

/// Marks today complete for a habit (tap-to-toggle).
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Repeat calls within the same day are idempotent (`added = false`).
#[flutter_rust_bridge::frb(sync)]
pub fn habit_toggle_today(habit_id: String) -> ToggleTodayResponse {
    let result = with_habit(&habit_id, |store, habit| {
        store.toggle_today(habit).map_err(|err| err.to_string())
    });
    match result {
        Ok(added) => ToggleTodayResponse {
            ok: true,
            added,
            message: if added {
                "Marked today complete.".to_string()
            } else {
                "Today was already complete.".to_string()
            },
        },
        Err(err) => ToggleTodayResponse {
            ok: false,
            added: false,
            message: format!("habit_toggle_today failed: {err}"),
        },
    }
}

fn resolve_db_path() -> PathBuf {
    HABIT_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("HABITLOOP_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(HABIT_DB_FILE_NAME)
        })
        .clone()
}

fn with_store<T>(
    f: impl FnOnce(&HabitService<SqliteHabitRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("habit DB open failed: {err}"))?;
    let repo = SqliteHabitRepository::new(&conn);
    let store = HabitService::new(repo);
    f(&store)
}

fn with_habit<T>(
    habit_id: &str,
    f: impl FnOnce(
        &HabitService<SqliteHabitRepository<'_>>,
        &mut habitloop_core::Habit,
    ) -> Result<T, String>,
) -> Result<T, String> {
    let id = parse_habit_id(habit_id)?;
    with_store(|store| {
        let mut habit = store
            .get_habit(id)
            .map_err(|err| err.to_string())?
            .ok_or_else(|| format!("habit not found: {id}"))?;
        f(store, &mut habit)
    })
}

fn parse_habit_id(raw: &str) -> Result<HabitId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid habit id `{raw}`"))
}
