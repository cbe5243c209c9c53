//! App core for tvbrowser.
//!
//! Central struct wiring the database, the SQLite stores, the history logger
//! and the home links model together.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::database::Database;
use crate::managers::favorites_store::SqliteFavoritesStore;
use crate::managers::history_logger::HistoryLogger;
use crate::managers::history_store::SqliteHistoryStore;
use crate::managers::home_links::HomeLinksModel;
use crate::types::config::Config;

/// Central application struct holding the data-layer components.
pub struct App {
    pub db: Arc<Database>,
    pub config: Config,
    pub history_logger: HistoryLogger,
    pub home_links: HomeLinksModel,
}

impl App {
    /// Creates a new App over the database at `db_path`.
    pub fn new(db_path: &str, config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Arc::new(Database::open(db_path)?);

        let history_store = Arc::new(SqliteHistoryStore::new(db.clone()));
        let favorites_store = Arc::new(SqliteFavoritesStore::new(db.clone()));

        let history_logger = HistoryLogger::new(history_store.clone(), config.clone());
        let home_links = HomeLinksModel::new(favorites_store, history_store, config.clone());

        Ok(Self {
            db,
            config,
            history_logger,
            home_links,
        })
    }

    /// Startup sequence: compact and seed history, then load the home links.
    ///
    /// Both steps degrade gracefully — a broken store leaves the browser with
    /// empty history and an empty grid rather than failing startup.
    pub fn startup(&mut self) {
        self.history_logger.init(now_ms());
        if let Err(e) = self.home_links.load() {
            log::warn!("Loading home page links failed: {}", e);
        }
    }
}

/// Current wall-clock time in milliseconds since the UNIX epoch.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
