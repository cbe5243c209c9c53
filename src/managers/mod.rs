// tvbrowser state managers
// Managers handle stateful operations: visit logging, home-page links, and the
// SQLite-backed stores behind them.

pub mod favorites_store;
pub mod history_logger;
pub mod history_store;
pub mod home_links;
