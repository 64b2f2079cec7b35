//! Application state - shared across all handlers.

use std::sync::Arc;

use newsroom_core::moderation::BannedWords;
use newsroom_core::ports::{CommentRepository, NewsRepository, UserRepository};
use newsroom_infra::{InMemoryCommentRepository, InMemoryNewsRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
use newsroom_infra::{
    DatabaseConnections, PostgresCommentRepository, PostgresNewsRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub news: Arc<dyn NewsRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub users: Arc<dyn UserRepository>,
    pub banned_words: Arc<BannedWords>,
    pub news_page_size: u64,
    pub login_url: String,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            match DatabaseConnections::init(db_config).await {
                Ok(conn) => {
                    tracing::info!("Application state initialized (postgres)");
                    return Self {
                        news: Arc::new(PostgresNewsRepository::new(conn.main.clone())),
                        comments: Arc::new(PostgresCommentRepository::new(conn.main.clone())),
                        users: Arc::new(PostgresUserRepository::new(conn.main.clone())),
                        banned_words: Arc::new(Self::banned_words(config)),
                        news_page_size: config.news_page_size,
                        login_url: config.login_url.clone(),
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        Self::in_memory(config)
    }

    /// In-memory state: fallback when no database is configured.
    pub fn in_memory(config: &AppConfig) -> Self {
        tracing::info!("Application state initialized (in-memory)");
        Self {
            news: Arc::new(InMemoryNewsRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            banned_words: Arc::new(Self::banned_words(config)),
            news_page_size: config.news_page_size,
            login_url: config.login_url.clone(),
        }
    }

    fn banned_words(config: &AppConfig) -> BannedWords {
        BannedWords::new(config.bad_words.clone(), config.moderation_warning.clone())
    }
}
