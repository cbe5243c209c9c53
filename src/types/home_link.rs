use serde::{Deserialize, Serialize};

use super::favorite::FavoriteRecord;
use super::history::HistoryEntry;

/// A shortcut shown on the home-page grid.
///
/// `favorite_id` is present only for links backed by a favorite record;
/// links derived from history are session-local and their order is never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeLink {
    pub favorite_id: Option<String>,
    pub title: String,
    pub url: String,
    /// Destination override used when the link points through a redirector.
    pub dest_url: Option<String>,
    pub position: i32,
}

impl HomeLink {
    /// Builds a link from a browsing history entry (not bookmarked).
    pub fn from_history_entry(entry: &HistoryEntry) -> Self {
        Self {
            favorite_id: None,
            title: entry.title.clone(),
            url: entry.url.clone(),
            dest_url: None,
            position: 0,
        }
    }

    /// Builds a link from a persisted favorite record.
    pub fn from_favorite(record: &FavoriteRecord) -> Self {
        Self {
            favorite_id: record.id.clone(),
            title: record.title.clone(),
            url: record.url.clone(),
            dest_url: record.dest_url.clone(),
            position: record.position,
        }
    }

    /// URL to navigate to when the link is activated.
    pub fn navigation_url(&self) -> &str {
        self.dest_url.as_deref().unwrap_or(&self.url)
    }
}
