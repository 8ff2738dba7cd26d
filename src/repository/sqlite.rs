//! SQLite Repository
//!
//! Stores pets and reminders in two tables. A save replaces both tables in
//! a single transaction; the `snapshot_meta` row records that a save
//! happened at all, so an empty save still loads as `Some`.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection};

use crate::domain::{DomainError, DomainResult, Pet, Reminder};
use super::traits::{Snapshot, SnapshotRepository};

pub struct SqliteRepository {
    conn: Mutex<Connection>,
    location: String,
}

impl SqliteRepository {
    /// Open (or create) a database file and run migrations
    pub fn open(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DomainError::Internal(format!("Failed to create data directory: {}", e)))?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| DomainError::Internal(format!("Failed to open {}: {}", path.display(), e)))?;
        Self::from_connection(conn, path.display().to_string())
    }

    /// Private in-memory database
    pub fn open_in_memory() -> DomainResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| DomainError::Internal(e.to_string()))?;
        Self::from_connection(conn, ":memory:".to_string())
    }

    fn from_connection(conn: Connection, location: String) -> DomainResult<Self> {
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            location,
        })
    }

    fn lock(&self) -> DomainResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| DomainError::Internal("database connection poisoned".into()))
    }
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({})", table))
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    for name in names {
        if name.map_err(|e| DomainError::Internal(e.to_string()))? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS pets (
            id TEXT PRIMARY KEY,
            position INTEGER NOT NULL,
            name TEXT NOT NULL,
            avatar TEXT
        );
        CREATE TABLE IF NOT EXISTS reminders (
            id TEXT PRIMARY KEY,
            position INTEGER NOT NULL,
            title TEXT NOT NULL,
            pet_id TEXT NOT NULL,
            pet_name TEXT NOT NULL DEFAULT '',
            category TEXT NOT NULL,
            notes TEXT,
            start_date TEXT NOT NULL,
            time TEXT NOT NULL,
            frequency TEXT NOT NULL,
            is_completed INTEGER NOT NULL DEFAULT 0,
            completed_at TEXT,
            streak INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS snapshot_meta (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            saved_at TEXT NOT NULL
        );",
    )
    .map_err(|e| DomainError::Internal(format!("Failed to create tables: {}", e)))?;

    // Completion history came after the first schema
    if !column_exists(conn, "reminders", "completed_dates")? {
        conn.execute(
            "ALTER TABLE reminders ADD COLUMN completed_dates TEXT NOT NULL DEFAULT '[]'",
            [],
        )
        .map_err(|e| DomainError::Internal(format!("Failed to add completed_dates: {}", e)))?;
    }

    Ok(())
}

/// Raw column values; converted to a `Reminder` outside the row callback
struct ReminderRow {
    id: String,
    title: String,
    pet_id: String,
    pet_name: String,
    category: String,
    notes: Option<String>,
    start_date: String,
    time: String,
    frequency: String,
    is_completed: bool,
    completed_at: Option<String>,
    completed_dates: String,
    streak: u32,
    created_at: String,
    updated_at: String,
}

fn parse_date(value: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| DomainError::Internal(format!("bad date '{}': {}", value, e)))
}

fn parse_timestamp(value: &str) -> DomainResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| DomainError::Internal(format!("bad timestamp '{}': {}", value, e)))
}

fn row_to_reminder(row: ReminderRow) -> DomainResult<Reminder> {
    let completed_dates: BTreeSet<NaiveDate> = serde_json::from_str(&row.completed_dates)
        .map_err(|e| DomainError::Internal(format!("bad completed_dates for {}: {}", row.id, e)))?;

    Ok(Reminder {
        category: row.category.parse()?,
        frequency: row.frequency.parse()?,
        start_date: parse_date(&row.start_date)?,
        completed_at: row.completed_at.as_deref().map(parse_timestamp).transpose()?,
        created_at: parse_timestamp(&row.created_at)?,
        updated_at: parse_timestamp(&row.updated_at)?,
        completed_dates,
        id: row.id,
        title: row.title,
        pet_id: row.pet_id,
        pet_name: row.pet_name,
        notes: row.notes,
        time: row.time,
        is_completed: row.is_completed,
        streak: row.streak,
    })
}

impl SnapshotRepository for SqliteRepository {
    fn load(&self) -> DomainResult<Option<Snapshot>> {
        let conn = self.lock()?;

        let saved: i64 = conn
            .query_row("SELECT COUNT(*) FROM snapshot_meta", [], |row| row.get(0))
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if saved == 0 {
            return Ok(None);
        }

        let mut stmt = conn
            .prepare("SELECT id, name, avatar FROM pets ORDER BY position ASC")
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let pets = stmt
            .query_map([], |row| {
                Ok(Pet {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    avatar: row.get(2)?,
                })
            })
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT id, title, pet_id, pet_name, category, notes, start_date, time, frequency,
                        is_completed, completed_at, completed_dates, streak, created_at, updated_at
                 FROM reminders ORDER BY position ASC",
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ReminderRow {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    pet_id: row.get(2)?,
                    pet_name: row.get(3)?,
                    category: row.get(4)?,
                    notes: row.get(5)?,
                    start_date: row.get(6)?,
                    time: row.get(7)?,
                    frequency: row.get(8)?,
                    is_completed: row.get(9)?,
                    completed_at: row.get(10)?,
                    completed_dates: row.get(11)?,
                    streak: row.get(12)?,
                    created_at: row.get(13)?,
                    updated_at: row.get(14)?,
                })
            })
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let reminders = rows
            .into_iter()
            .map(row_to_reminder)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Some(Snapshot { reminders, pets }))
    }

    fn save(&self, snapshot: &Snapshot) -> DomainResult<()> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        tx.execute("DELETE FROM pets", [])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        tx.execute("DELETE FROM reminders", [])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        for (position, pet) in snapshot.pets.iter().enumerate() {
            tx.execute(
                "INSERT INTO pets (id, position, name, avatar) VALUES (?1, ?2, ?3, ?4)",
                params![pet.id, position as i64, pet.name, pet.avatar],
            )
            .map_err(|e| DomainError::Internal(format!("Failed to save pet {}: {}", pet.id, e)))?;
        }

        for (position, r) in snapshot.reminders.iter().enumerate() {
            let completed_dates = serde_json::to_string(&r.completed_dates)
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            tx.execute(
                "INSERT INTO reminders (id, position, title, pet_id, pet_name, category, notes, start_date,
                                        time, frequency, is_completed, completed_at, completed_dates, streak,
                                        created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
                params![
                    r.id,
                    position as i64,
                    r.title,
                    r.pet_id,
                    r.pet_name,
                    r.category.as_str(),
                    r.notes,
                    r.start_date.format("%Y-%m-%d").to_string(),
                    r.time,
                    r.frequency.as_str(),
                    r.is_completed,
                    r.completed_at.map(|t| t.to_rfc3339()),
                    completed_dates,
                    r.streak,
                    r.created_at.to_rfc3339(),
                    r.updated_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DomainError::Internal(format!("Failed to save reminder {}: {}", r.id, e)))?;
        }

        tx.execute(
            "INSERT OR REPLACE INTO snapshot_meta (id, saved_at) VALUES (1, ?1)",
            params![Utc::now().to_rfc3339()],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        tx.commit().map_err(|e| DomainError::Internal(e.to_string()))?;
        log::debug!(
            "Snapshot saved to {} ({} reminders, {} pets)",
            self.location,
            snapshot.reminders.len(),
            snapshot.pets.len()
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.location)
    }
}
