//! tvbrowser — speed-dial and browsing-history data layer for a TV-oriented web browser.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod database;
pub mod managers;
pub mod types;
