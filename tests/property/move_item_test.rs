//! Property-based tests for home-page grid reordering.
//!
//! For any sequence of move requests — valid or not — the grid must keep the
//! "add new" sentinel in the last slot and must neither lose, duplicate nor
//! invent links.

use std::sync::Arc;

use proptest::prelude::*;
use tvbrowser::database::Database;
use tvbrowser::managers::favorites_store::{FavoritesStore, SqliteFavoritesStore};
use tvbrowser::managers::history_store::SqliteHistoryStore;
use tvbrowser::managers::home_links::{GridItem, HomeLinksModel};
use tvbrowser::types::config::{Config, HomePageLinksMode};
use tvbrowser::types::favorite::FavoriteRecord;

/// Builds a model preloaded with `count` bookmark links "link0".."linkN".
fn model_with_links(count: usize) -> HomeLinksModel {
    let db = Arc::new(Database::open_in_memory().expect("Failed to open in-memory database"));
    let favorites = Arc::new(SqliteFavoritesStore::new(db.clone()));
    let history = Arc::new(SqliteHistoryStore::new(db));

    for i in 0..count {
        let mut record = FavoriteRecord::new(
            &format!("link{}", i),
            &format!("https://link{}.example.com", i),
        );
        record.position = i as i32;
        favorites.insert(&record).unwrap();
    }

    let config = Config {
        home_page_links_mode: HomePageLinksMode::Bookmarks,
        ..Config::default()
    };
    let mut model = HomeLinksModel::new(favorites, history, config);
    model.load().unwrap();
    model
}

fn sorted_titles(model: &HomeLinksModel) -> Vec<String> {
    let mut titles: Vec<String> = model.links().iter().map(|l| l.title.clone()).collect();
    titles.sort();
    titles
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn moves_preserve_links_and_sentinel(
        link_count in 1usize..8,
        moves in proptest::collection::vec((0usize..10, -12isize..12), 0..20),
    ) {
        let mut model = model_with_links(link_count);
        let before = sorted_titles(&model);

        model.enter_move_mode();
        for (from, to) in moves {
            // Every move-mode input is handled, valid target or not.
            prop_assert!(model.move_item(from, to));

            prop_assert_eq!(model.items().last(), Some(&GridItem::AddButton));
            prop_assert_eq!(model.items().len(), link_count + 1);
        }

        prop_assert_eq!(sorted_titles(&model), before);
    }

    #[test]
    fn moves_outside_move_mode_change_nothing(
        link_count in 1usize..8,
        from in 0usize..10,
        to in -12isize..12,
    ) {
        let mut model = model_with_links(link_count);
        let before = model.links();

        prop_assert!(!model.move_item(from, to));
        prop_assert_eq!(model.links(), before);
    }
}
