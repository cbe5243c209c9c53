//! tvbrowser — speed-dial and browsing-history data layer for a TV-oriented web browser.
//!
//! Entry point: runs an interactive console demo of the data layer. The
//! actual TV UI integrates against the library crate.

use std::sync::Arc;
use std::time::Duration;

use tvbrowser::app::{now_ms, App};
use tvbrowser::database::Database;
use tvbrowser::managers::favorites_store::{FavoritesStore, SqliteFavoritesStore};
use tvbrowser::managers::history_logger::{HistoryLogger, VISIT_DEBOUNCE_MS};
use tvbrowser::managers::history_store::SqliteHistoryStore;
use tvbrowser::managers::home_links::{HomeLinksModel, MoveDirection, DEFAULT_GRID_SPAN};
use tvbrowser::types::config::{Config, HomePageLinksMode};
use tvbrowser::types::favorite::FavoriteRecord;

#[tokio::main]
async fn main() {
    env_logger::init();

    println!();
    println!("tvbrowser v{} — data layer demo", env!("CARGO_PKG_VERSION"));
    println!();

    let db = Arc::new(Database::open_in_memory().expect("Failed to open database"));
    let history_store = Arc::new(SqliteHistoryStore::new(db.clone()));
    let favorites_store = Arc::new(SqliteFavoritesStore::new(db.clone()));

    demo_home_links(favorites_store.clone(), history_store.clone());
    demo_history_logger(history_store).await;
    demo_app();
}

fn demo_app() {
    section("App wiring");

    let config = Config::load("tvbrowser.json").unwrap_or_default();
    let mut app = App::new(":memory:", config).expect("Failed to build app");
    app.startup();

    app.home_links
        .add_link(FavoriteRecord::new("Search", "https://search.example.com"))
        .expect("add link");
    app.history_logger
        .log_visit(Some("Search"), "https://search.example.com", None, now_ms());
    println!(
        "  App started: {} home link(s), pending visit = {:?}",
        app.home_links.links().len(),
        app.history_logger.last_entry().map(|e| e.url)
    );
    println!();
}

fn section(name: &str) {
    println!("--- {} ---", name);
}

fn demo_home_links(favorites: Arc<SqliteFavoritesStore>, history: Arc<SqliteHistoryStore>) {
    section("Home links");

    for (position, (title, url)) in [
        ("News", "https://news.example.com"),
        ("Video", "https://video.example.com"),
        ("Weather", "https://weather.example.com"),
    ]
    .into_iter()
    .enumerate()
    {
        let mut record = FavoriteRecord::new(title, url);
        record.position = position as i32;
        favorites.insert(&record).expect("insert favorite");
    }

    let config = Config {
        home_page_links_mode: HomePageLinksMode::Bookmarks,
        ..Config::default()
    };
    let mut model = HomeLinksModel::new(favorites, history, config);
    model.load().expect("load links");
    println!("  Loaded {} links (+ add card)", model.links().len());

    model.enter_move_mode();
    model.move_focused(0, MoveDirection::Right, DEFAULT_GRID_SPAN);
    model.exit_move_mode().expect("persist order");
    let titles: Vec<String> = model.links().iter().map(|l| l.title.clone()).collect();
    println!("  Order after moving first link right: {:?}", titles);
    println!();
}

async fn demo_history_logger(history: Arc<SqliteHistoryStore>) {
    section("History logger");

    let mut logger = HistoryLogger::new(history.clone(), Config::default());
    logger.init(now_ms());

    logger.log_visit(Some("Home"), "browser://home", None, now_ms());
    logger.log_visit(Some("FTP"), "ftp://files.example.com", None, now_ms());
    println!("  Home page and non-HTTP visits ignored: pending = {:?}",
        logger.last_entry().map(|e| e.url));

    logger.log_visit(Some("Typo"), "https://exmaple.com", None, now_ms());
    logger.log_visit(Some("Example"), "https://example.com", None, now_ms());
    println!("  Rapid re-navigation supersedes the pending visit");

    tokio::time::sleep(Duration::from_millis(VISIT_DEBOUNCE_MS as u64 + 200)).await;
    let entry = logger.last_entry().expect("pending entry");
    println!("  Persisted after debounce: {} (saved = {})", entry.url, entry.saved);
}
