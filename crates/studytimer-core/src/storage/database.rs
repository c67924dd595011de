//! SQLite-based goal and session storage.
//!
//! Provides persistent storage for:
//! - Goals and their accumulated study time
//! - Completed study sessions
//! - Key-value store for application state (timer snapshot, current goal)

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::data_dir;
use crate::error::{CoreError, DatabaseError};
use crate::ledger::{Goal, Session};

/// SQLite database for goals and sessions.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data dir>/studytimer.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unusable or the database
    /// cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("studytimer.db");
        Ok(Self::open_at(&path)?)
    }

    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (tests, throwaway sessions).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS goals (
                id                  TEXT PRIMARY KEY,
                description         TEXT NOT NULL,
                created_at_ms       INTEGER NOT NULL,
                total_time_studied  INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS sessions (
                id              TEXT PRIMARY KEY,
                goal_id         TEXT NOT NULL,
                occurred_at_ms  INTEGER NOT NULL,
                duration        INTEGER NOT NULL,
                completed       INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_goals_created_at ON goals(created_at_ms);
            CREATE INDEX IF NOT EXISTS idx_sessions_goal_id ON sessions(goal_id);
            CREATE INDEX IF NOT EXISTS idx_sessions_occurred_at ON sessions(occurred_at_ms);",
        )?;
        Ok(())
    }

    /// Store a goal created by the ledger, keeping its id and timestamp.
    /// Writing the same goal twice is harmless.
    pub fn insert_goal(&self, goal: &Goal) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO goals (id, description, created_at_ms, total_time_studied)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                goal.id,
                goal.description,
                goal.created_at_epoch_ms,
                goal.total_time_studied,
            ],
        )?;
        Ok(())
    }

    /// Record a session and add its duration to the goal's total.
    ///
    /// Both writes happen in one transaction. A session already present is
    /// ignored so a retried write never double-counts.
    pub fn record_session(&self, session: &Session) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO sessions (id, goal_id, occurred_at_ms, duration, completed)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                session.id,
                session.goal_id,
                session.occurred_at_epoch_ms,
                session.duration,
                session.completed,
            ],
        )?;
        if inserted > 0 {
            tx.execute(
                "UPDATE goals SET total_time_studied = total_time_studied + ?1 WHERE id = ?2",
                params![session.duration, session.goal_id],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// All goals, oldest first (the ledger's insertion order).
    pub fn list_goals(&self) -> Result<Vec<Goal>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, description, created_at_ms, total_time_studied
             FROM goals
             ORDER BY created_at_ms ASC, rowid ASC",
        )?;
        let rows = stmt.query_map([], goal_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Sessions oldest first, optionally restricted to one goal.
    pub fn list_sessions(&self, goal_id: Option<&str>) -> Result<Vec<Session>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, goal_id, occurred_at_ms, duration, completed
             FROM sessions
             WHERE ?1 IS NULL OR goal_id = ?1
             ORDER BY occurred_at_ms ASC, rowid ASC",
        )?;
        let rows = stmt.query_map(params![goal_id], session_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

fn goal_from_row(row: &Row<'_>) -> rusqlite::Result<Goal> {
    Ok(Goal {
        id: row.get(0)?,
        description: row.get(1)?,
        created_at_epoch_ms: row.get(2)?,
        total_time_studied: row.get(3)?,
    })
}

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get(0)?,
        goal_id: row.get(1)?,
        occurred_at_epoch_ms: row.get(2)?,
        duration: row.get(3)?,
        completed: row.get(4)?,
    })
}
