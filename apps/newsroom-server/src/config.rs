//! Application configuration loaded from environment variables.

use std::env;

use newsroom_core::moderation::{DEFAULT_BAD_WORDS, DEFAULT_WARNING};
use newsroom_infra::DatabaseConfig;

/// Default number of news items on the home page.
const DEFAULT_NEWS_PAGE_SIZE: u64 = 10;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// How many news items the home page shows.
    pub news_page_size: u64,
    /// Substrings that block a comment.
    pub bad_words: Vec<String>,
    /// The warning attached to a rejected comment.
    pub moderation_warning: String,
    /// Where anonymous write attempts are redirected.
    pub login_url: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            news_page_size: env::var("NEWS_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_NEWS_PAGE_SIZE),
            bad_words: env::var("BAD_WORDS")
                .map(|v| v.split(',').map(str::to_string).collect())
                .unwrap_or_else(|_| DEFAULT_BAD_WORDS.iter().map(|w| w.to_string()).collect()),
            moderation_warning: env::var("MODERATION_WARNING")
                .unwrap_or_else(|_| DEFAULT_WARNING.to_string()),
            login_url: env::var("LOGIN_URL").unwrap_or_else(|_| "/api/auth/login".to_string()),
        }
    }
}
