//! Habit repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `habits` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Habit::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Every mutation is atomic: habit row and completion rows change inside
//!   one transaction.

use crate::db::DbError;
use crate::model::habit::{Habit, HabitId, HabitValidationError};
use rusqlite::{params, Connection};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for habit persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(HabitValidationError),
    Db(DbError),
    NotFound(HabitId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "habit not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted habit data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<HabitValidationError> for RepoError {
    fn from(value: HabitValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for habit CRUD operations.
pub trait HabitRepository {
    fn insert_habit(&self, habit: &Habit) -> RepoResult<HabitId>;
    fn update_habit(&self, habit: &Habit) -> RepoResult<()>;
    fn get_habit(&self, id: HabitId) -> RepoResult<Option<Habit>>;
    /// Lists all habits ordered by creation time, oldest first.
    fn list_habits(&self) -> RepoResult<Vec<Habit>>;
    /// Hard-deletes the habit and its completion rows.
    fn remove_habit(&self, id: HabitId) -> RepoResult<()>;
}

/// SQLite-backed habit repository.
pub struct SqliteHabitRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHabitRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn load_completion_days(&self, id: HabitId) -> RepoResult<BTreeSet<i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT day FROM habit_completions WHERE habit_uuid = ?1;")?;
        let rows = stmt.query_map([id.to_string()], |row| row.get::<_, i64>(0))?;
        let days = rows.collect::<Result<BTreeSet<i64>, _>>()?;
        Ok(days)
    }

    fn replace_completion_days(&self, habit: &Habit) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM habit_completions WHERE habit_uuid = ?1;",
            [habit.id.to_string()],
        )?;

        let mut stmt = self.conn.prepare(
            "INSERT INTO habit_completions (habit_uuid, day) VALUES (?1, ?2);",
        )?;
        for &day in &habit.completion_days {
            stmt.execute(params![habit.id.to_string(), day])?;
        }

        Ok(())
    }

    fn assemble_habit(
        &self,
        uuid_text: &str,
        name: String,
        created_at: i64,
    ) -> RepoResult<Habit> {
        let id = Uuid::parse_str(uuid_text).map_err(|_| {
            RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in habits.uuid"))
        })?;

        let habit = Habit {
            id,
            name,
            created_at,
            completion_days: self.load_completion_days(id)?,
        };
        habit.validate()?;
        Ok(habit)
    }
}

impl HabitRepository for SqliteHabitRepository<'_> {
    fn insert_habit(&self, habit: &Habit) -> RepoResult<HabitId> {
        habit.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO habits (uuid, name, created_at) VALUES (?1, ?2, ?3);",
            params![habit.id.to_string(), habit.name.as_str(), habit.created_at],
        )?;
        // A freshly created habit starts empty; non-empty sets occur on
        // import-style inserts.
        if !habit.completion_days.is_empty() {
            self.replace_completion_days(habit)?;
        }
        tx.commit()?;

        Ok(habit.id)
    }

    fn update_habit(&self, habit: &Habit) -> RepoResult<()> {
        habit.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE habits
             SET
                name = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2;",
            params![habit.name.as_str(), habit.id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(habit.id));
        }

        self.replace_completion_days(habit)?;
        tx.commit()?;

        Ok(())
    }

    fn get_habit(&self, id: HabitId) -> RepoResult<Option<Habit>> {
        let mut stmt = self
            .conn
            .prepare("SELECT uuid, name, created_at FROM habits WHERE uuid = ?1;")?;
        let mut rows = stmt.query([id.to_string()])?;

        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let (uuid_text, name, created_at) = (
            row.get::<_, String>("uuid")?,
            row.get::<_, String>("name")?,
            row.get::<_, i64>("created_at")?,
        );

        Ok(Some(self.assemble_habit(&uuid_text, name, created_at)?))
    }

    fn list_habits(&self) -> RepoResult<Vec<Habit>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, created_at
             FROM habits
             ORDER BY created_at ASC, uuid ASC;",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>("uuid")?,
                row.get::<_, String>("name")?,
                row.get::<_, i64>("created_at")?,
            ))
        })?;

        let mut habits = Vec::new();
        for row in rows {
            let (uuid_text, name, created_at) = row?;
            habits.push(self.assemble_habit(&uuid_text, name, created_at)?);
        }

        Ok(habits)
    }

    fn remove_habit(&self, id: HabitId) -> RepoResult<()> {
        // habit_completions rows go with the habit via ON DELETE CASCADE.
        let changed = self
            .conn
            .execute("DELETE FROM habits WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}
