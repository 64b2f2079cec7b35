use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - a reader's reply to a news item.
///
/// `author_id` never changes after creation; only `text` is mutable, and only
/// through the owning author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub news_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment stamped with the current time.
    pub fn new(news_id: Uuid, author_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            news_id,
            author_id,
            text,
            created: Utc::now(),
        }
    }
}
