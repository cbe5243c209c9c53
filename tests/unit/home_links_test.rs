//! Unit tests for the home links model.
//!
//! Exercises grid loading, move-mode reordering, the trailing "add new"
//! sentinel invariants, add/edit/remove, and order persistence through the
//! `FavoritesStore` interface, using an in-memory SQLite database.

use std::sync::Arc;

use rstest::rstest;
use tvbrowser::database::Database;
use tvbrowser::managers::favorites_store::{FavoritesStore, SqliteFavoritesStore};
use tvbrowser::managers::history_store::{HistoryStore, SqliteHistoryStore};
use tvbrowser::managers::home_links::{GridItem, HomeLinksModel, MoveDirection};
use tvbrowser::types::config::{Config, HomePageLinksMode, HomePageMode};
use tvbrowser::types::favorite::FavoriteRecord;
use tvbrowser::types::history::HistoryEntry;

/// Helper: a model loaded with bookmark links titled as given, plus the
/// favorites store for asserts.
fn setup_bookmarks(titles: &[&str]) -> (HomeLinksModel, Arc<SqliteFavoritesStore>) {
    let db = Arc::new(Database::open_in_memory().expect("Failed to open in-memory database"));
    let favorites = Arc::new(SqliteFavoritesStore::new(db.clone()));
    let history = Arc::new(SqliteHistoryStore::new(db));

    for (index, title) in titles.iter().enumerate() {
        let mut record =
            FavoriteRecord::new(title, &format!("https://{}.example.com", title.to_lowercase()));
        record.position = index as i32;
        favorites.insert(&record).unwrap();
    }

    let config = Config {
        home_page_links_mode: HomePageLinksMode::Bookmarks,
        ..Config::default()
    };
    let mut model = HomeLinksModel::new(favorites.clone(), history, config);
    model.load().unwrap();
    (model, favorites)
}

fn link_titles(model: &HomeLinksModel) -> Vec<String> {
    model.links().iter().map(|l| l.title.clone()).collect()
}

#[test]
fn test_load_appends_sentinel_last() {
    let (model, _) = setup_bookmarks(&["A", "B", "C"]);

    assert_eq!(model.items().len(), 4);
    assert_eq!(model.items().last(), Some(&GridItem::AddButton));
    assert_eq!(link_titles(&model), vec!["A", "B", "C"]);
}

#[test]
fn test_empty_model_is_just_the_sentinel() {
    let (model, _) = setup_bookmarks(&[]);
    assert_eq!(model.items(), &[GridItem::AddButton]);
}

#[test]
fn test_blank_home_page_mode_loads_nothing() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let favorites = Arc::new(SqliteFavoritesStore::new(db.clone()));
    let history = Arc::new(SqliteHistoryStore::new(db));
    favorites
        .insert(&FavoriteRecord::new("A", "https://a.example.com"))
        .unwrap();

    let config = Config {
        home_page_mode: HomePageMode::Blank,
        home_page_links_mode: HomePageLinksMode::Bookmarks,
        ..Config::default()
    };
    let mut model = HomeLinksModel::new(favorites, history, config);
    model.load().unwrap();

    assert_eq!(model.items(), &[GridItem::AddButton]);
}

#[test]
fn test_history_derived_links_have_no_favorite_id() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let favorites = Arc::new(SqliteFavoritesStore::new(db.clone()));
    let history = Arc::new(SqliteHistoryStore::new(db));
    history
        .insert(&HistoryEntry::new("https://example.com", "Example", 1000, None))
        .unwrap();

    let config = Config {
        home_page_links_mode: HomePageLinksMode::LatestHistory,
        ..Config::default()
    };
    let mut model = HomeLinksModel::new(favorites, history, config);
    model.load().unwrap();

    let links = model.links();
    assert_eq!(links.len(), 1);
    assert!(links[0].favorite_id.is_none());
}

// Grid [A, B, C, D, +]: the sentinel slot (index 4) is never a valid source
// or target, out-of-range and self moves are handled but change nothing.
#[rstest]
#[case(0, 1, vec!["B", "A", "C", "D"])]
#[case(0, 3, vec!["B", "C", "D", "A"])]
#[case(3, 0, vec!["D", "A", "B", "C"])]
#[case(3, 10, vec!["A", "B", "C", "D"])]
#[case(0, -1, vec!["A", "B", "C", "D"])]
#[case(2, 2, vec!["A", "B", "C", "D"])]
#[case(1, 4, vec!["A", "B", "C", "D"])]
#[case(4, 2, vec!["A", "B", "C", "D"])]
fn test_move_item_cases(#[case] from: usize, #[case] to: isize, #[case] expected: Vec<&str>) {
    let (mut model, _) = setup_bookmarks(&["A", "B", "C", "D"]);
    model.enter_move_mode();

    assert!(model.move_item(from, to), "move input should be handled");

    assert_eq!(link_titles(&model), expected);
    assert_eq!(model.items().last(), Some(&GridItem::AddButton));
}

#[test]
fn test_move_item_requires_move_mode() {
    let (mut model, _) = setup_bookmarks(&["A", "B"]);

    assert!(!model.move_item(0, 1));
    assert_eq!(link_titles(&model), vec!["A", "B"]);
}

// With spanCount=2 the grid is two columns: down from A lands on C.
#[rstest]
#[case(MoveDirection::Right, vec!["B", "A", "C", "D"])]
#[case(MoveDirection::Down, vec!["B", "C", "A", "D"])]
#[case(MoveDirection::Left, vec!["A", "B", "C", "D"])]
#[case(MoveDirection::Up, vec!["A", "B", "C", "D"])]
fn test_move_focused_direction_mapping(#[case] direction: MoveDirection, #[case] expected: Vec<&str>) {
    let (mut model, _) = setup_bookmarks(&["A", "B", "C", "D"]);
    model.enter_move_mode();

    model.move_focused(0, direction, 2);

    assert_eq!(link_titles(&model), expected);
}

#[test]
fn test_exit_move_mode_persists_new_order() {
    let (mut model, favorites) = setup_bookmarks(&["A", "B", "C", "D"]);

    model.enter_move_mode();
    model.move_item(0, 2);
    assert_eq!(link_titles(&model), vec!["B", "C", "A", "D"]);
    model.exit_move_mode().unwrap();
    assert!(!model.is_move_mode());

    let persisted = favorites.home_page_bookmarks().unwrap();
    let titles: Vec<&str> = persisted.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "C", "A", "D"]);
}

#[test]
fn test_exit_move_mode_is_idempotent() {
    let (mut model, favorites) = setup_bookmarks(&["A", "B"]);

    model.enter_move_mode();
    model.move_item(0, 1);
    model.exit_move_mode().unwrap();
    // A second exit without entering again persists the same order without error.
    model.exit_move_mode().unwrap();

    let persisted = favorites.home_page_bookmarks().unwrap();
    let titles: Vec<&str> = persisted.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "A"]);
}

#[test]
fn test_reorder_skips_history_derived_links() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let favorites = Arc::new(SqliteFavoritesStore::new(db.clone()));
    let history = Arc::new(SqliteHistoryStore::new(db));
    for (url, time) in [("https://a.example.com", 1000), ("https://b.example.com", 2000)] {
        history.insert(&HistoryEntry::new(url, "", time, None)).unwrap();
    }

    let config = Config {
        home_page_links_mode: HomePageLinksMode::LatestHistory,
        ..Config::default()
    };
    let mut model = HomeLinksModel::new(favorites.clone(), history, config);
    model.load().unwrap();

    model.enter_move_mode();
    model.move_item(0, 1);
    model.exit_move_mode().unwrap();

    // Nothing referenced a favorite record, so nothing was written.
    assert!(favorites.home_page_bookmarks().unwrap().is_empty());
}

#[test]
fn test_add_link_without_id_inserts_and_appends_before_sentinel() {
    let (mut model, favorites) = setup_bookmarks(&["A"]);

    model
        .add_link(FavoriteRecord::new("B", "https://b.example.com"))
        .unwrap();

    assert_eq!(link_titles(&model), vec!["A", "B"]);
    assert_eq!(model.items().last(), Some(&GridItem::AddButton));

    let added = &model.links()[1];
    let id = added.favorite_id.as_ref().expect("fresh id assigned");
    assert!(favorites.get_by_id(id).unwrap().is_some());
}

#[test]
fn test_add_link_with_id_updates_in_place() {
    let (mut model, favorites) = setup_bookmarks(&["A", "B"]);
    let id = model.links()[0].favorite_id.clone().unwrap();

    let mut edited = favorites.get_by_id(&id).unwrap().unwrap();
    edited.title = "A edited".to_string();
    model.add_link(edited.clone()).unwrap();

    edited.title = "A edited twice".to_string();
    model.add_link(edited).unwrap();

    // Two edits are two updates, never two inserts.
    assert_eq!(link_titles(&model), vec!["A edited twice", "B"]);
    assert_eq!(favorites.home_page_bookmarks().unwrap().len(), 2);
    assert_eq!(
        favorites.get_by_id(&id).unwrap().unwrap().title,
        "A edited twice"
    );
}

#[test]
fn test_remove_link_deletes_record_and_grid_entry() {
    let (mut model, favorites) = setup_bookmarks(&["A", "B"]);
    let link = model.links()[0].clone();
    let id = link.favorite_id.clone().unwrap();

    model.remove_link(&link).unwrap();

    assert_eq!(link_titles(&model), vec!["B"]);
    assert_eq!(model.items().last(), Some(&GridItem::AddButton));
    assert!(favorites.get_by_id(&id).unwrap().is_none());
}

#[test]
fn test_remove_history_derived_link_touches_no_store() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let favorites = Arc::new(SqliteFavoritesStore::new(db.clone()));
    let history = Arc::new(SqliteHistoryStore::new(db));
    history
        .insert(&HistoryEntry::new("https://a.example.com", "A", 1000, None))
        .unwrap();

    let config = Config {
        home_page_links_mode: HomePageLinksMode::LatestHistory,
        ..Config::default()
    };
    let mut model = HomeLinksModel::new(favorites, history, config);
    model.load().unwrap();

    let link = model.links()[0].clone();
    model.remove_link(&link).unwrap();

    assert_eq!(model.items(), &[GridItem::AddButton]);
}

#[test]
fn test_snapshots_follow_mutations() {
    let (mut model, _) = setup_bookmarks(&["A", "B"]);
    let rx = model.subscribe();

    model.enter_move_mode();
    model.move_item(0, 1);

    let snapshot = rx.borrow().clone();
    assert_eq!(
        snapshot
            .iter()
            .filter_map(|i| i.link().map(|l| l.title.clone()))
            .collect::<Vec<_>>(),
        vec!["B", "A"]
    );
    assert_eq!(snapshot.last(), Some(&GridItem::AddButton));
}
