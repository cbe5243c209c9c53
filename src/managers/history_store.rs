//! History store for tvbrowser.
//!
//! Defines the `HistoryStore` contract used by the history logger and the
//! home links model, plus its SQLite implementation via `rusqlite`.

use std::sync::Arc;

use rusqlite::params;
use uuid::Uuid;

use crate::database::Database;
use crate::types::errors::HistoryError;
use crate::types::history::HistoryEntry;

/// Trait defining history storage operations.
///
/// Implementations must be shareable with tokio tasks: the debounced persist
/// and fire-and-forget title updates run off the main logical thread.
pub trait HistoryStore: Send + Sync {
    /// Total number of history rows.
    fn count(&self) -> Result<i64, HistoryError>;
    /// Deletes all rows with a visit time strictly older than `visit_time_ms`.
    fn delete_older_than(&self, visit_time_ms: i64) -> Result<(), HistoryError>;
    /// Most recent entries, newest first.
    fn most_recent(&self, limit: i64) -> Result<Vec<HistoryEntry>, HistoryError>;
    /// Inserts an entry and returns the store-assigned ID.
    fn insert(&self, entry: &HistoryEntry) -> Result<String, HistoryError>;
    /// Updates the title of an already persisted entry.
    fn update_title(&self, id: &str, title: &str) -> Result<(), HistoryError>;
    /// One entry per distinct URL, most frequently visited first.
    fn frequently_visited(&self, limit: i64) -> Result<Vec<HistoryEntry>, HistoryError>;
}

/// History store backed by a SQLite database.
pub struct SqliteHistoryStore {
    db: Arc<Database>,
}

impl SqliteHistoryStore {
    /// Creates a new `SqliteHistoryStore` sharing the given database.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Reads a single `HistoryEntry` row into a struct.
    ///
    /// Rows coming from the store are saved by definition.
    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<HistoryEntry> {
        Ok(HistoryEntry {
            id: Some(row.get(0)?),
            url: row.get(1)?,
            title: row.get(2)?,
            visit_time: row.get(3)?,
            favicon: row.get(4)?,
            saved: true,
        })
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn count(&self) -> Result<i64, HistoryError> {
        self.db
            .connection()
            .query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))
    }

    fn delete_older_than(&self, visit_time_ms: i64) -> Result<(), HistoryError> {
        self.db
            .connection()
            .execute(
                "DELETE FROM history WHERE visit_time < ?1",
                params![visit_time_ms],
            )
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn most_recent(&self, limit: i64) -> Result<Vec<HistoryEntry>, HistoryError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(
                "SELECT id, url, title, visit_time, favicon \
                 FROM history ORDER BY visit_time DESC LIMIT ?1",
            )
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map(params![limit], Self::row_to_entry)
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| HistoryError::DatabaseError(e.to_string()))?);
        }
        Ok(results)
    }

    fn insert(&self, entry: &HistoryEntry) -> Result<String, HistoryError> {
        let id = Uuid::new_v4().to_string();
        self.db
            .connection()
            .execute(
                "INSERT INTO history (id, url, title, visit_time, favicon) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, entry.url, entry.title, entry.visit_time, entry.favicon],
            )
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;
        Ok(id)
    }

    fn update_title(&self, id: &str, title: &str) -> Result<(), HistoryError> {
        let affected = self
            .db
            .connection()
            .execute(
                "UPDATE history SET title = ?1 WHERE id = ?2",
                params![title, id],
            )
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(HistoryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Groups rows by URL and orders by visit count; the representative row
    /// for each URL is the latest visit (SQLite picks the bare columns from
    /// the row that produced `MAX(visit_time)`).
    fn frequently_visited(&self, limit: i64) -> Result<Vec<HistoryEntry>, HistoryError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(
                "SELECT id, url, title, MAX(visit_time) AS visit_time, favicon \
                 FROM history GROUP BY url \
                 ORDER BY COUNT(*) DESC, visit_time DESC LIMIT ?1",
            )
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map(params![limit], Self::row_to_entry)
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| HistoryError::DatabaseError(e.to_string()))?);
        }
        Ok(results)
    }
}
