//! Favorites store for tvbrowser.
//!
//! Defines the `FavoritesStore` contract backing the home-page link grid,
//! plus its SQLite implementation via `rusqlite`.

use std::sync::Arc;

use rusqlite::params;
use uuid::Uuid;

use crate::database::Database;
use crate::types::errors::FavoritesError;
use crate::types::favorite::FavoriteRecord;

/// Trait defining favorite record storage operations.
pub trait FavoritesStore: Send + Sync {
    /// Fetches a record by ID, `None` when it does not exist.
    fn get_by_id(&self, id: &str) -> Result<Option<FavoriteRecord>, FavoritesError>;
    /// Inserts a record and returns the store-assigned ID.
    fn insert(&self, record: &FavoriteRecord) -> Result<String, FavoritesError>;
    /// Updates an existing record in full.
    fn update(&self, record: &FavoriteRecord) -> Result<(), FavoritesError>;
    /// Deletes a record by ID. Deleting a missing record is a no-op.
    fn delete(&self, id: &str) -> Result<(), FavoritesError>;
    /// All records flagged for the home page, ordered by position.
    fn home_page_bookmarks(&self) -> Result<Vec<FavoriteRecord>, FavoritesError>;
}

/// Favorites store backed by a SQLite database.
pub struct SqliteFavoritesStore {
    db: Arc<Database>,
}

impl SqliteFavoritesStore {
    /// Creates a new `SqliteFavoritesStore` sharing the given database.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Reads a single `FavoriteRecord` row into a struct.
    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<FavoriteRecord> {
        Ok(FavoriteRecord {
            id: Some(row.get(0)?),
            title: row.get(1)?,
            url: row.get(2)?,
            dest_url: row.get(3)?,
            position: row.get(4)?,
            home_page: row.get::<_, i32>(5)? != 0,
        })
    }
}

impl FavoritesStore for SqliteFavoritesStore {
    fn get_by_id(&self, id: &str) -> Result<Option<FavoriteRecord>, FavoritesError> {
        let conn = self.db.connection();
        let result = conn.query_row(
            "SELECT id, title, url, dest_url, position, home_page \
             FROM favorites WHERE id = ?1",
            params![id],
            Self::row_to_record,
        );

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(FavoritesError::DatabaseError(e.to_string())),
        }
    }

    fn insert(&self, record: &FavoriteRecord) -> Result<String, FavoritesError> {
        let id = Uuid::new_v4().to_string();
        self.db
            .connection()
            .execute(
                "INSERT INTO favorites (id, title, url, dest_url, position, home_page) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    id,
                    record.title,
                    record.url,
                    record.dest_url,
                    record.position,
                    record.home_page as i32
                ],
            )
            .map_err(|e| FavoritesError::DatabaseError(e.to_string()))?;
        Ok(id)
    }

    fn update(&self, record: &FavoriteRecord) -> Result<(), FavoritesError> {
        let id = record
            .id
            .as_deref()
            .ok_or_else(|| FavoritesError::NotFound("<unsaved record>".to_string()))?;

        let affected = self
            .db
            .connection()
            .execute(
                "UPDATE favorites SET title = ?1, url = ?2, dest_url = ?3, position = ?4, home_page = ?5 \
                 WHERE id = ?6",
                params![
                    record.title,
                    record.url,
                    record.dest_url,
                    record.position,
                    record.home_page as i32,
                    id
                ],
            )
            .map_err(|e| FavoritesError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(FavoritesError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), FavoritesError> {
        self.db
            .connection()
            .execute("DELETE FROM favorites WHERE id = ?1", params![id])
            .map_err(|e| FavoritesError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn home_page_bookmarks(&self) -> Result<Vec<FavoriteRecord>, FavoritesError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(
                "SELECT id, title, url, dest_url, position, home_page \
                 FROM favorites WHERE home_page = 1 ORDER BY position",
            )
            .map_err(|e| FavoritesError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_record)
            .map_err(|e| FavoritesError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| FavoritesError::DatabaseError(e.to_string()))?);
        }
        Ok(results)
    }
}
