use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::errors::ConfigError;

/// URL of the built-in home page. Navigations to it are never recorded.
pub const HOME_PAGE_URL: &str = "browser://home";

/// What the browser shows on a new tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomePageMode {
    /// The speed-dial home page with shortcut links.
    HomePage,
    /// An empty page, no links loaded.
    Blank,
}

/// Which source populates the home-page link grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomePageLinksMode {
    MostVisited,
    LatestHistory,
    Bookmarks,
}

/// Browser configuration, injected into each component at construction.
///
/// This is an immutable value object; components take a clone instead of
/// reaching into process-wide state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub home_page_url: String,
    pub incognito_mode: bool,
    pub home_page_mode: HomePageMode,
    pub home_page_links_mode: HomePageLinksMode,
}

impl Config {
    /// Loads the configuration from a JSON file.
    ///
    /// A missing file is not an error: defaults are returned so a fresh
    /// profile starts without a config file on disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("Failed to read config file: {}", e)))?;
        serde_json::from_str(&content).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to parse config file: {}", e))
        })
    }

    /// Writes the configuration to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })?;
        fs::write(path, json)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config file: {}", e)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_page_url: HOME_PAGE_URL.to_string(),
            incognito_mode: false,
            home_page_mode: HomePageMode::HomePage,
            home_page_links_mode: HomePageLinksMode::MostVisited,
        }
    }
}
