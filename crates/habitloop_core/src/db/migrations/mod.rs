//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically.
//! - Rewrite legacy calendar day keys into fixed-window buckets.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - After `normalize_legacy_day_keys` completes, `habit_completions.day`
//!   holds bucket values only.

use crate::day::{bucket, key};
use crate::db::{DbError, DbResult};
use crate::model::habit::MAX_DAY_BUCKET;
use rusqlite::{params, Connection};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

/// One-way data migration: rewrites legacy calendar `yyyyMMdd` completion
/// rows as fixed-window buckets.
///
/// Idempotent: once no stored day reaches the calendar range, this is a
/// single no-op query. Undecodable legacy keys are deleted; they name no
/// real date and could never match a current day. Returns the number of
/// legacy rows processed.
pub fn normalize_legacy_day_keys(conn: &Connection) -> DbResult<usize> {
    let tx = conn.unchecked_transaction()?;

    let legacy_rows: Vec<(String, i64)> = {
        let mut stmt = tx.prepare(
            "SELECT habit_uuid, day
             FROM habit_completions
             WHERE day >= ?1;",
        )?;
        let rows = stmt.query_map([MAX_DAY_BUCKET], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;
        rows.collect::<Result<_, _>>()?
    };

    for (habit_uuid, legacy_key) in &legacy_rows {
        if let Some(day) = key::to_start_of_day_utc(*legacy_key).map(bucket::bucket_for) {
            tx.execute(
                "INSERT OR IGNORE INTO habit_completions (habit_uuid, day)
                 VALUES (?1, ?2);",
                params![habit_uuid, day],
            )?;
        }
        tx.execute(
            "DELETE FROM habit_completions WHERE habit_uuid = ?1 AND day = ?2;",
            params![habit_uuid, legacy_key],
        )?;
    }

    tx.commit()?;
    Ok(legacy_rows.len())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
