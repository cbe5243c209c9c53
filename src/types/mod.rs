// Core data types shared across the tvbrowser data layer.

pub mod config;
pub mod errors;
pub mod favorite;
pub mod history;
pub mod home_link;
