use std::fmt;

// === HistoryError ===

/// Errors related to browsing history storage operations.
#[derive(Debug)]
pub enum HistoryError {
    /// History entry with the given ID was not found.
    NotFound(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::NotFound(id) => write!(f, "History entry not found: {}", id),
            HistoryError::DatabaseError(msg) => write!(f, "History database error: {}", msg),
        }
    }
}

impl std::error::Error for HistoryError {}

// === FavoritesError ===

/// Errors related to favorite (home-page bookmark) storage operations.
#[derive(Debug)]
pub enum FavoritesError {
    /// Favorite record with the given ID was not found.
    NotFound(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for FavoritesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FavoritesError::NotFound(id) => write!(f, "Favorite not found: {}", id),
            FavoritesError::DatabaseError(msg) => write!(f, "Favorites database error: {}", msg),
        }
    }
}

impl std::error::Error for FavoritesError {}

// === ConfigError ===

/// Errors related to configuration persistence.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading or writing the config file.
    IoError(String),
    /// Failed to serialize or deserialize the configuration.
    SerializationError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::SerializationError(msg) => {
                write!(f, "Config serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// === HomeLinksError ===

/// Errors surfaced by the home links model.
///
/// Store failures during add/remove/reorder are collapsed into a single
/// generic variant; the in-memory sequence is kept as-is and the UI is
/// expected to reload from the store on next startup.
#[derive(Debug)]
pub enum HomeLinksError {
    /// One or more store writes failed while applying the operation.
    StoreFailure,
}

impl fmt::Display for HomeLinksError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeLinksError::StoreFailure => write!(f, "Home links store operation failed"),
        }
    }
}

impl std::error::Error for HomeLinksError {}
