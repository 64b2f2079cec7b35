//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One article in the home feed or on a detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

/// The home page: newest articles first, capped at the configured count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsFeedResponse {
    pub news_feed: Vec<NewsItem>,
}

/// One comment in a detail-page thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentItem {
    pub id: Uuid,
    pub news_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// Submitted comment body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentFormData {
    pub text: String,
}

/// Comment form as rendered back to the client.
///
/// `errors` is empty for a pristine form; a rejected submission echoes the
/// submitted text with the field-level warnings attached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentFormState {
    pub text: String,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl CommentFormState {
    /// A rejected submission: the original text plus one field error.
    pub fn with_error(text: String, error: String) -> Self {
        Self {
            text,
            errors: vec![error],
        }
    }
}

/// Detail page: the article, its comment thread oldest-first, and - for
/// authenticated requesters only - an empty submission form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsDetailResponse {
    pub news: NewsItem,
    pub comments: Vec<CommentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<CommentFormState>,
}

/// Edit page for a comment: the form pre-filled with the current text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentEditResponse {
    pub comment: CommentItem,
    pub form: CommentFormState,
}

/// Delete confirmation page for a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDeleteResponse {
    pub comment: CommentItem,
}

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login/signup form as rendered back to the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthFormState {
    pub email: String,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl AuthFormState {
    pub fn with_error(email: String, error: impl Into<String>) -> Self {
        Self {
            email,
            errors: vec![error.into()],
        }
    }
}
