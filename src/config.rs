use std::time::Duration;

pub const API_BASE: &str = "https://api.scryfall.com";
pub const USER_AGENT: &str = concat!("mtg-deckbuilder/", env!("CARGO_PKG_VERSION"));

/// Scryfall asks clients to stay at or below ten requests per second.
pub const DEFAULT_MAX_REQUESTS: usize = 10;
pub const DEFAULT_TIME_WINDOW: Duration = Duration::from_millis(1000);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const SEARCH_PATH: &str = "/cards/search";

pub fn catalog_path(name: &str) -> String {
    format!("/catalog/{}", name)
}
