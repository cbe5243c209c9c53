//! History logger for tvbrowser.
//!
//! Decides whether a visited URL should be recorded, debounces rapid
//! re-visits, and writes rows through a [`HistoryStore`]. A visit becomes
//! durable only after [`VISIT_DEBOUNCE_MS`] elapses without being superseded
//! by another navigation; superseded entries are discarded, never persisted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::managers::history_store::HistoryStore;
use crate::types::config::Config;
use crate::types::errors::HistoryError;
use crate::types::history::HistoryEntry;

/// Interval a visit must survive un-superseded before it is persisted.
pub const VISIT_DEBOUNCE_MS: i64 = 5000;

/// Row count above which old history is compacted on startup.
pub const HISTORY_ROW_LIMIT: i64 = 5000;

/// Retention window for the startup compaction (3 months).
pub const HISTORY_RETENTION_MS: i64 = 90 * 24 * 60 * 60 * 1000;

/// Shared pending-entry state, also touched by the scheduled persist task.
struct LoggerState {
    /// The pending (or most recently saved) visit.
    last: Option<HistoryEntry>,
    /// Bumped on every accepted visit; a persist task only writes while the
    /// generation it captured is still current, so a stale task can never
    /// write a superseding entry.
    generation: u64,
}

/// Cancellation token for the currently scheduled persist.
struct PendingSave {
    cancelled: Arc<AtomicBool>,
}

/// Records qualifying navigations with a debounce against rapid re-visits.
///
/// All mutations of the pending entry happen either through `&mut self` on
/// the owning thread or inside the persist task, with the shared `Mutex`
/// providing exclusion between the two.
pub struct HistoryLogger {
    store: Arc<dyn HistoryStore>,
    config: Config,
    state: Arc<Mutex<LoggerState>>,
    pending_save: Option<PendingSave>,
}

impl HistoryLogger {
    /// Creates a new `HistoryLogger` writing through the given store.
    pub fn new(store: Arc<dyn HistoryStore>, config: Config) -> Self {
        Self {
            store,
            config,
            state: Arc::new(Mutex::new(LoggerState {
                last: None,
                generation: 0,
            })),
            pending_save: None,
        }
    }

    /// Startup sequence: compacts oversized history, then seeds the pending
    /// entry from the most recent row.
    ///
    /// Store errors are logged and swallowed — a broken history store must
    /// not prevent the browser from starting.
    pub fn init(&mut self, now_ms: i64) {
        log::debug!("init history");
        match self.store.count() {
            Ok(count) if count > HISTORY_ROW_LIMIT => {
                if let Err(e) = self.store.delete_older_than(now_ms - HISTORY_RETENTION_MS) {
                    log::warn!("History retention cleanup failed: {}", e);
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("History row count failed: {}", e),
        }

        match self.store.most_recent(1) {
            Ok(entries) => {
                lock(&self.state).last = entries.into_iter().next();
            }
            Err(e) => log::warn!("Loading last history entry failed: {}", e),
        }
    }

    /// Records a navigation to `url` happening at `now_ms`.
    ///
    /// Ignored when the URL matches the pending entry, is the home page, or
    /// does not start with an HTTP(S) scheme. If the pending entry is still
    /// inside its debounce window, its scheduled persist is cancelled and the
    /// entry is discarded. The new entry is persisted after the debounce
    /// interval unless superseded in turn.
    ///
    /// Must be called from within a tokio runtime.
    pub fn log_visit(&mut self, title: Option<&str>, url: &str, favicon: Option<&str>, now_ms: i64) {
        log::debug!("log_visit: {}", url);
        if url == self.config.home_page_url || !has_http_scheme(url) {
            return;
        }

        let generation;
        {
            let mut state = lock(&self.state);
            if let Some(last) = &state.last {
                if last.url == url {
                    return;
                }
                if !last.saved && last.visit_time + VISIT_DEBOUNCE_MS > now_ms {
                    if let Some(pending) = &self.pending_save {
                        pending.cancelled.store(true, Ordering::SeqCst);
                    }
                }
            }

            state.last = Some(HistoryEntry::new(url, title.unwrap_or(""), now_ms, favicon));
            state.generation += 1;
            generation = state.generation;
        }

        let cancelled = Arc::new(AtomicBool::new(false));
        let token = cancelled.clone();
        let store = self.store.clone();
        let state = self.state.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(VISIT_DEBOUNCE_MS as u64)).await;
            // Claim the token before writing; cancel and write cannot both win.
            if token.swap(true, Ordering::SeqCst) {
                return;
            }
            let mut state = lock(&state);
            if state.generation != generation {
                return;
            }
            if let Some(entry) = state.last.as_mut() {
                match store.insert(entry) {
                    Ok(id) => {
                        entry.id = Some(id);
                        entry.saved = true;
                    }
                    Err(e) => log::warn!("History persist failed: {}", e),
                }
            }
        });
        self.pending_save = Some(PendingSave { cancelled });
    }

    /// Propagates a late title update from the page into the pending entry.
    ///
    /// If the entry was already persisted, a fire-and-forget title write is
    /// issued; failures are logged, never surfaced. No-op in incognito mode.
    pub fn on_title_updated(&self, url: &str, title: &str) {
        log::debug!("on_title_updated: {} {}", url, title);
        if self.config.incognito_mode {
            return;
        }

        let mut state = lock(&self.state);
        let Some(entry) = state.last.as_mut() else {
            return;
        };
        if entry.url != url {
            return;
        }
        entry.title = title.to_string();

        if entry.saved {
            if let Some(id) = entry.id.clone() {
                let store = self.store.clone();
                let title = title.to_string();
                tokio::spawn(async move {
                    match store.update_title(&id, &title) {
                        // The row may have been compacted away meanwhile.
                        Ok(()) | Err(HistoryError::NotFound(_)) => {}
                        Err(e) => log::warn!("History title update failed: {}", e),
                    }
                });
            }
        }
    }

    /// Snapshot of the pending (or most recently saved) entry.
    pub fn last_entry(&self) -> Option<HistoryEntry> {
        lock(&self.state).last.clone()
    }
}

/// True when the URL begins with `http` case-insensitively (covers https).
fn has_http_scheme(url: &str) -> bool {
    url.get(..4).is_some_and(|prefix| prefix.eq_ignore_ascii_case("http"))
}

fn lock(state: &Mutex<LoggerState>) -> MutexGuard<'_, LoggerState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
