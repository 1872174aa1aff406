//! `SMARTFUNDS_API_URL` and `SMARTFUNDS_LOG` are read at compile time.

use std::str::FromStr;

pub const API_BASE_URL: &str = match option_env!("SMARTFUNDS_API_URL") {
    Some(url) => url,
    None => "http://localhost:5000/api",
};

const LOG_LEVEL: Option<&str> = option_env!("SMARTFUNDS_LOG");

/// Local-storage key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "accessToken";
pub const SETTINGS_STORAGE_KEY: &str = "settings";

pub const CUSTOMERS_PER_PAGE: usize = 10;
pub const RECORDS_PER_PAGE: usize = 10;
pub const COMPLETED_PER_PAGE: usize = 7;

/// Pages shown on each side of the current one.
pub const PAGE_WINDOW: u32 = 1;

/// Horizontal travel, in CSS pixels, before a touch counts as a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

pub const DEFAULT_DAY_OFFSET: i64 = 100;

pub fn api_url(path: &str) -> String {
    format!("{}{}", API_BASE_URL.trim_end_matches('/'), path)
}

pub fn log_level() -> log::Level {
    LOG_LEVEL
        .and_then(|raw| log::Level::from_str(raw).ok())
        .unwrap_or(log::Level::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_joins_without_double_slash() {
        let url = api_url("/customers");
        assert!(url.ends_with("/customers"));
        assert!(!url.contains("//customers"));
    }
}
