//! Home links model for tvbrowser.
//!
//! Maintains the ordered speed-dial grid shown on the home page: real links
//! followed by a single trailing "add new" sentinel card. Supports
//! D-pad-driven reordering while in move mode and persists the resulting
//! order through a [`FavoritesStore`] when the interaction ends.
//!
//! The render layer consumes immutable snapshots through a watch channel
//! instead of aliasing the live sequence.

use std::sync::Arc;

use tokio::sync::watch;

use crate::managers::favorites_store::FavoritesStore;
use crate::managers::history_store::HistoryStore;
use crate::types::config::{Config, HomePageLinksMode, HomePageMode};
use crate::types::errors::{FavoritesError, HomeLinksError};
use crate::types::favorite::FavoriteRecord;
use crate::types::home_link::HomeLink;

/// Number of history-derived links loaded onto the home page.
const HISTORY_LINKS_LIMIT: i64 = 8;

/// Default number of grid columns on a TV screen.
pub const DEFAULT_GRID_SPAN: usize = 4;

/// One cell of the home-page grid.
#[derive(Debug, Clone, PartialEq)]
pub enum GridItem {
    Link(HomeLink),
    /// The "add new" pseudo-entry. Always last, never movable, never persisted.
    AddButton,
}

impl GridItem {
    /// The link behind this cell, `None` for the sentinel.
    pub fn link(&self) -> Option<&HomeLink> {
        match self {
            GridItem::Link(link) => Some(link),
            GridItem::AddButton => None,
        }
    }
}

/// D-pad direction for reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
    Up,
    Down,
}

impl MoveDirection {
    /// Index delta for this direction in a grid with `span_count` columns.
    fn delta(self, span_count: usize) -> isize {
        match self {
            MoveDirection::Left => -1,
            MoveDirection::Right => 1,
            MoveDirection::Up => -(span_count as isize),
            MoveDirection::Down => span_count as isize,
        }
    }
}

/// Ordered home-page link sequence with move-mode reordering.
pub struct HomeLinksModel {
    favorites: Arc<dyn FavoritesStore>,
    history: Arc<dyn HistoryStore>,
    config: Config,
    items: Vec<GridItem>,
    move_mode: bool,
    snapshot_tx: watch::Sender<Vec<GridItem>>,
}

impl HomeLinksModel {
    /// Creates an empty model (just the sentinel) over the given stores.
    pub fn new(
        favorites: Arc<dyn FavoritesStore>,
        history: Arc<dyn HistoryStore>,
        config: Config,
    ) -> Self {
        let items = vec![GridItem::AddButton];
        let (snapshot_tx, _) = watch::channel(items.clone());
        Self {
            favorites,
            history,
            config,
            items,
            move_mode: false,
            snapshot_tx,
        }
    }

    /// Populates the grid from the configured source.
    ///
    /// History-derived links carry no favorite ID and their order resets each
    /// session; bookmark links come back in their persisted order.
    pub fn load(&mut self) -> Result<(), HomeLinksError> {
        log::debug!("load home page links");
        if self.config.home_page_mode != HomePageMode::HomePage {
            return Ok(());
        }

        let links: Vec<HomeLink> = match self.config.home_page_links_mode {
            HomePageLinksMode::MostVisited => self
                .history
                .frequently_visited(HISTORY_LINKS_LIMIT)
                .map_err(|e| {
                    log::warn!("Loading most visited links failed: {}", e);
                    HomeLinksError::StoreFailure
                })?
                .iter()
                .map(HomeLink::from_history_entry)
                .collect(),
            HomePageLinksMode::LatestHistory => self
                .history
                .most_recent(HISTORY_LINKS_LIMIT)
                .map_err(|e| {
                    log::warn!("Loading latest history links failed: {}", e);
                    HomeLinksError::StoreFailure
                })?
                .iter()
                .map(HomeLink::from_history_entry)
                .collect(),
            HomePageLinksMode::Bookmarks => self
                .favorites
                .home_page_bookmarks()
                .map_err(|e| {
                    log::warn!("Loading home page bookmarks failed: {}", e);
                    HomeLinksError::StoreFailure
                })?
                .iter()
                .map(HomeLink::from_favorite)
                .collect(),
        };

        self.items = links.into_iter().map(GridItem::Link).collect();
        self.items.push(GridItem::AddButton);
        self.publish();
        Ok(())
    }

    /// Subscribes to grid snapshots. The receiver sees an immutable clone of
    /// the sequence after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<GridItem>> {
        self.snapshot_tx.subscribe()
    }

    /// Current grid contents, sentinel included.
    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    /// Current links, sentinel excluded.
    pub fn links(&self) -> Vec<HomeLink> {
        self.items
            .iter()
            .filter_map(|item| item.link().cloned())
            .collect()
    }

    /// Whether move mode is active.
    pub fn is_move_mode(&self) -> bool {
        self.move_mode
    }

    /// Enables move mode; directional input now reorders instead of focusing.
    pub fn enter_move_mode(&mut self) {
        self.move_mode = true;
    }

    /// Leaves move mode and persists the current order.
    ///
    /// Each link backed by a favorite record gets its position field updated
    /// to its index; records missing from the store are skipped silently.
    /// History-derived links are not persisted. Safe to call repeatedly —
    /// the same order is simply written again.
    pub fn exit_move_mode(&mut self) -> Result<(), HomeLinksError> {
        self.move_mode = false;
        self.persist_order()
    }

    /// Moves the item at `from` to `to`, keeping the sentinel last.
    ///
    /// Valid only in move mode. Returns `true` when the input was handled,
    /// which includes rejected moves (out-of-range target, sentinel source,
    /// or `from == to`) — those leave the sequence unchanged.
    pub fn move_item(&mut self, from: usize, to: isize) -> bool {
        if !self.move_mode {
            return false;
        }
        // The sentinel's slot is never a valid source or target.
        let movable = self.items.len() - 1;
        if from >= movable || to < 0 || to as usize >= movable {
            return true;
        }
        let to = to as usize;
        if from == to {
            return true;
        }

        let item = self.items.remove(from);
        self.items.insert(to.min(self.items.len() - 1), item);
        self.publish();
        true
    }

    /// Maps a D-pad press on the item at `position` to an index move.
    ///
    /// `span_count` is the number of grid columns: up/down move by a whole
    /// row, left/right by one cell.
    pub fn move_focused(&mut self, position: usize, direction: MoveDirection, span_count: usize) -> bool {
        let to = position as isize + direction.delta(span_count);
        self.move_item(position, to)
    }

    /// Adds a new link or applies an edit to an existing one.
    ///
    /// A record without an ID is inserted, receives its store-assigned ID and
    /// is appended before the sentinel. A record with an ID is updated and
    /// replaces the sequence entry with the matching favorite ID in place.
    pub fn add_link(&mut self, record: FavoriteRecord) -> Result<(), HomeLinksError> {
        let Some(id) = record.id.clone() else {
            let id = self.favorites.insert(&record).map_err(|e| {
                log::warn!("Favorite insert failed: {}", e);
                HomeLinksError::StoreFailure
            })?;
            let mut saved = record;
            saved.id = Some(id);
            let sentinel = self.items.len() - 1;
            self.items
                .insert(sentinel, GridItem::Link(HomeLink::from_favorite(&saved)));
            self.publish();
            return Ok(());
        };

        match self.favorites.update(&record) {
            Ok(()) => {}
            // Record vanished from the store; keep the in-memory edit.
            Err(FavoritesError::NotFound(_)) => {}
            Err(e) => {
                log::warn!("Favorite update failed: {}", e);
                return Err(HomeLinksError::StoreFailure);
            }
        }
        let index = self
            .items
            .iter()
            .position(|item| item.link().and_then(|l| l.favorite_id.as_deref()) == Some(id.as_str()));
        if let Some(index) = index {
            self.items[index] = GridItem::Link(HomeLink::from_favorite(&record));
        }
        self.publish();
        Ok(())
    }

    /// Removes a link from the grid and deletes its favorite record, if any.
    ///
    /// The in-memory sequence is updated immediately; a failed store delete
    /// is reported but not rolled back.
    pub fn remove_link(&mut self, link: &HomeLink) -> Result<(), HomeLinksError> {
        self.items.retain(|item| match item.link() {
            Some(existing) => !same_link(existing, link),
            None => true,
        });
        self.publish();

        if let Some(id) = &link.favorite_id {
            self.favorites.delete(id).map_err(|e| {
                log::warn!("Favorite delete failed: {}", e);
                HomeLinksError::StoreFailure
            })?;
        }
        Ok(())
    }

    /// Writes the positional index of every favorite-backed link.
    fn persist_order(&self) -> Result<(), HomeLinksError> {
        let mut failed = false;
        for (index, item) in self.items.iter().enumerate() {
            let Some(id) = item.link().and_then(|l| l.favorite_id.as_deref()) else {
                continue;
            };
            match self.favorites.get_by_id(id) {
                Ok(Some(mut record)) => {
                    record.position = index as i32;
                    match self.favorites.update(&record) {
                        Ok(()) | Err(FavoritesError::NotFound(_)) => {}
                        Err(e) => {
                            log::warn!("Persisting order of favorite {} failed: {}", id, e);
                            failed = true;
                        }
                    }
                }
                // Deleted behind our back; its slot just isn't persisted.
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Fetching favorite {} failed: {}", id, e);
                    failed = true;
                }
            }
        }

        if failed {
            Err(HomeLinksError::StoreFailure)
        } else {
            Ok(())
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.items.clone());
    }
}

/// Identity for removal: favorite ID when present, otherwise the URL.
fn same_link(a: &HomeLink, b: &HomeLink) -> bool {
    match (&a.favorite_id, &b.favorite_id) {
        (Some(x), Some(y)) => x == y,
        (None, None) => a.url == b.url,
        _ => false,
    }
}
