//! Property-based tests for history visit filtering.
//!
//! For any URL that is the home page or lacks an HTTP(S) scheme, `log_visit`
//! must never schedule a persist — no pending entry appears and nothing is
//! ever written. Filtered visits return before any task is spawned, so these
//! tests run without a runtime.

use std::sync::Arc;

use proptest::prelude::*;
use tvbrowser::database::Database;
use tvbrowser::managers::history_logger::HistoryLogger;
use tvbrowser::managers::history_store::{HistoryStore, SqliteHistoryStore};
use tvbrowser::types::config::Config;

fn setup() -> (HistoryLogger, Arc<SqliteHistoryStore>) {
    let db = Arc::new(Database::open_in_memory().expect("Failed to open in-memory database"));
    let store = Arc::new(SqliteHistoryStore::new(db));
    (HistoryLogger::new(store.clone(), Config::default()), store)
}

/// Strategy producing URL-ish strings that do not start with "http"
/// case-insensitively: other schemes, bare words, and empty-ish input.
fn arb_non_http_url() -> impl Strategy<Value = String> {
    prop_oneof![
        // Non-HTTP schemes
        (
            prop_oneof![
                Just("ftp"),
                Just("file"),
                Just("about"),
                Just("data"),
                Just("javascript"),
                Just("ws")
            ],
            "[a-z0-9./-]{0,20}",
        )
            .prop_map(|(scheme, rest)| format!("{}:{}", scheme, rest)),
        // Schemeless fragments
        "[a-z0-9 ./-]{0,12}",
    ]
    .prop_filter("must not begin with http", |url| {
        !url
            .get(..4)
            .map(|p| p.eq_ignore_ascii_case("http"))
            .unwrap_or(false)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn non_http_urls_never_schedule_a_persist(
        url in arb_non_http_url(),
        title in proptest::option::of("[a-zA-Z0-9 ]{0,16}"),
        now in 0i64..10_000_000,
    ) {
        let (mut logger, store) = setup();

        logger.log_visit(title.as_deref(), &url, None, now);

        prop_assert!(logger.last_entry().is_none());
        prop_assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn the_home_page_is_never_recorded(now in 0i64..10_000_000) {
        let (mut logger, store) = setup();
        let home = Config::default().home_page_url;

        logger.log_visit(Some("Home"), &home, None, now);

        prop_assert!(logger.last_entry().is_none());
        prop_assert_eq!(store.count().unwrap(), 0);
    }
}
