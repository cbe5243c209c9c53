use serde::{Deserialize, Serialize};

/// A single visit to a web page.
///
/// Created transiently on every qualifying navigation; `id` stays `None` and
/// `saved` stays `false` until the debounced persist actually writes the row.
/// Entries superseded before the debounce interval elapses are discarded and
/// never reach the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Option<String>,
    pub url: String,
    pub title: String,
    /// Visit time in milliseconds since the UNIX epoch.
    pub visit_time: i64,
    /// Opaque favicon reference (hash or cache key), if known.
    pub favicon: Option<String>,
    /// True once the entry has been written to the store.
    pub saved: bool,
}

impl HistoryEntry {
    /// Creates a new unsaved entry for a visit happening at `visit_time`.
    pub fn new(url: &str, title: &str, visit_time: i64, favicon: Option<&str>) -> Self {
        Self {
            id: None,
            url: url.to_string(),
            title: title.to_string(),
            visit_time,
            favicon: favicon.map(str::to_string),
            saved: false,
        }
    }
}
