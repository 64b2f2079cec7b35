use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// News entity - a published article.
///
/// Immutable after creation: articles are seeded externally (admin import)
/// and are read-only to end users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    /// Publish date. Defaults to the day of creation.
    pub date: NaiveDate,
}

impl News {
    /// Create a news item dated today.
    pub fn new(title: String, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            text,
            date: Utc::now().date_naive(),
        }
    }

    /// Create a news item with an explicit publish date.
    pub fn with_date(title: String, text: String, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            text,
            date,
        }
    }
}
