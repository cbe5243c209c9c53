use serde::{Deserialize, Serialize};

/// A persisted favorite (home-page bookmark) record.
///
/// `id` is `None` for records that have not been inserted yet; the store
/// assigns an identifier on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: Option<String>,
    pub title: String,
    pub url: String,
    /// Destination override used when the link points through a redirector.
    pub dest_url: Option<String>,
    /// Order index within the home-page grid.
    pub position: i32,
    /// Whether the record appears on the home page.
    pub home_page: bool,
}

impl FavoriteRecord {
    /// Creates a new unsaved home-page favorite.
    pub fn new(title: &str, url: &str) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            url: url.to_string(),
            dest_url: None,
            position: 0,
            home_page: true,
        }
    }
}
