//! SQLite-based streak and ritual-history storage.
//!
//! Provides persistent storage for:
//! - Per-user streak records (one row per user)
//! - Append-only ritual completion history
//!
//! The streak engine itself performs no I/O; this module supplies the
//! read-modify-write cycle around it. [`StreakDb::record_completion`] runs
//! load, engine, and writes inside one immediate transaction, so two
//! concurrent completions for the same user serialize on the database
//! write lock instead of clobbering each other.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::ritual::{CompletedRitual, RitualCompletionEvent};
use crate::streak::{CompletionOutcome, StreakEngine, StreakRecord};

use super::data_dir;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Default number of history entries returned when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: u32 = 100;

// === Helper Functions ===

/// Format a calendar date for database storage
fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a stored date column back into a calendar date
fn parse_date(table: &str, value: Option<String>) -> Result<Option<NaiveDate>, DatabaseError> {
    match value {
        None => Ok(None),
        Some(raw) => parse_date_required(table, raw).map(Some),
    }
}

fn parse_date_required(table: &str, raw: String) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|_| DatabaseError::CorruptRow {
        table: table.to_string(),
        message: format!("bad date '{raw}'"),
    })
}

fn row_to_record(row: &rusqlite::Row) -> Result<(StreakRecord, Option<String>, Option<String>), rusqlite::Error> {
    let last_raw: Option<String> = row.get(3)?;
    let window_raw: Option<String> = row.get(5)?;
    let record = StreakRecord {
        user_id: row.get(0)?,
        current_streak: row.get(1)?,
        longest_streak: row.get(2)?,
        last_completed_date: None,
        grace_used_in_window: row.get(4)?,
        window_start_date: None,
    };
    Ok((record, last_raw, window_raw))
}

fn fetch_streak(conn: &Connection, user_id: &str) -> Result<Option<StreakRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT user_id, current_streak, longest_streak, last_completed_date,
                grace_used_in_window, window_start_date
         FROM streaks WHERE user_id = ?1",
    )?;
    let row = stmt
        .query_row(params![user_id], row_to_record)
        .optional()?;
    match row {
        None => Ok(None),
        Some((mut record, last_raw, window_raw)) => {
            record.last_completed_date = parse_date("streaks", last_raw)?;
            record.window_start_date = parse_date("streaks", window_raw)?;
            Ok(Some(record))
        }
    }
}

fn upsert_streak(conn: &Connection, record: &StreakRecord) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO streaks (user_id, current_streak, longest_streak, last_completed_date,
                              grace_used_in_window, window_start_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(user_id) DO UPDATE SET
             current_streak = excluded.current_streak,
             longest_streak = excluded.longest_streak,
             last_completed_date = excluded.last_completed_date,
             grace_used_in_window = excluded.grace_used_in_window,
             window_start_date = excluded.window_start_date",
        params![
            record.user_id,
            record.current_streak,
            record.longest_streak,
            record.last_completed_date.map(format_date),
            record.grace_used_in_window,
            record.window_start_date.map(format_date),
        ],
    )?;
    Ok(())
}

fn append_log(conn: &Connection, event: &RitualCompletionEvent) -> Result<String, DatabaseError> {
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO ritual_history (id, user_id, date, completed, steps_completed,
                                     deity_used, soundscape_on, duration_sec)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id,
            event.user_id,
            format_date(event.date),
            event.completed,
            event.steps_completed,
            event.deity_used,
            event.soundscape_on,
            event.duration_sec,
        ],
    )?;
    Ok(id)
}

/// SQLite database for streak records and ritual history.
pub struct StreakDb {
    conn: Connection,
}

impl StreakDb {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/sadhana/sadhana.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("sadhana.db");
        let conn = Connection::open(&path)
            .map_err(|source| DatabaseError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, Box<dyn std::error::Error>> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS streaks (
                    user_id              TEXT PRIMARY KEY,
                    current_streak       INTEGER NOT NULL DEFAULT 0,
                    longest_streak       INTEGER NOT NULL DEFAULT 0,
                    last_completed_date  TEXT,
                    grace_used_in_window INTEGER NOT NULL DEFAULT 0,
                    window_start_date    TEXT
                );

                CREATE TABLE IF NOT EXISTS ritual_history (
                    id              TEXT PRIMARY KEY,
                    user_id         TEXT NOT NULL,
                    date            TEXT NOT NULL,
                    completed       INTEGER NOT NULL DEFAULT 1,
                    steps_completed INTEGER NOT NULL DEFAULT 5,
                    deity_used      TEXT NOT NULL DEFAULT '',
                    soundscape_on   INTEGER NOT NULL DEFAULT 0,
                    duration_sec    INTEGER NOT NULL DEFAULT 0
                );

                -- History is read newest-first per user
                CREATE INDEX IF NOT EXISTS idx_history_user_date
                    ON ritual_history(user_id, date);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Fetch a user's streak record, if one exists.
    pub fn streak_get(&self, user_id: &str) -> Result<Option<StreakRecord>, DatabaseError> {
        fetch_streak(&self.conn, user_id)
    }

    /// Fetch a user's streak record, creating the all-zero record if the
    /// user has never been seen.
    pub fn streak_init(&self, user_id: &str) -> Result<StreakRecord, DatabaseError> {
        if let Some(record) = fetch_streak(&self.conn, user_id)? {
            return Ok(record);
        }
        let record = StreakRecord::new(user_id);
        upsert_streak(&self.conn, &record)?;
        Ok(record)
    }

    /// Write a streak record, replacing any existing row for the user.
    pub fn streak_upsert(&self, record: &StreakRecord) -> Result<(), DatabaseError> {
        upsert_streak(&self.conn, record)
    }

    /// Append a completion event to the ritual log and return its id.
    pub fn log_append(&self, event: &RitualCompletionEvent) -> Result<String, DatabaseError> {
        append_log(&self.conn, event)
    }

    /// Ritual history for a user, newest first.
    pub fn history(
        &self,
        user_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<CompletedRitual>, DatabaseError> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, date, completed, steps_completed,
                    deity_used, soundscape_on, duration_sec
             FROM ritual_history
             WHERE user_id = ?1
             ORDER BY date DESC, rowid DESC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![user_id, limit], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, bool>(3)?,
                row.get::<_, u8>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, bool>(6)?,
                row.get::<_, u32>(7)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, user_id, date_raw, completed, steps_completed, deity_used, soundscape_on, duration_sec) = row?;
            let date = parse_date_required("ritual_history", date_raw)?;
            entries.push(CompletedRitual {
                id,
                event: RitualCompletionEvent {
                    user_id,
                    date,
                    completed,
                    steps_completed,
                    deity_used,
                    soundscape_on,
                    duration_sec,
                },
            });
        }
        Ok(entries)
    }

    /// Record one ritual completion: load (or lazily create) the streak
    /// record, run the engine, append the event to the log, and persist the
    /// updated record, all inside one immediate transaction.
    ///
    /// The returned outcome is exactly what was committed; on any error the
    /// transaction rolls back and the user-visible streak is unchanged.
    /// A replay of the already-recorded day still logs the event but leaves
    /// the streak row untouched.
    pub fn record_completion(
        &mut self,
        engine: &StreakEngine,
        event: &RitualCompletionEvent,
    ) -> Result<CompletionOutcome, DatabaseError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let record = match fetch_streak(&tx, &event.user_id)? {
            Some(record) => record,
            None => {
                let record = StreakRecord::new(&event.user_id);
                upsert_streak(&tx, &record)?;
                record
            }
        };

        let outcome = engine.record_completion(&record, event);

        append_log(&tx, event)?;
        if !outcome.already_completed {
            upsert_streak(&tx, &outcome.record)?;
        }

        tx.commit()?;
        Ok(outcome)
    }
}
