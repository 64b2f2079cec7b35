use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, News, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// `insert` and `update` are separate on purpose: primary keys are generated
/// client-side, so an upsert-style `save` cannot tell a new entity from an
/// existing one.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// News repository - read side of the article feed.
#[async_trait]
pub trait NewsRepository: BaseRepository<News, Uuid> {
    /// The most recent news, ordered by publish date descending,
    /// at most `limit` items.
    async fn list_recent(&self, limit: u64) -> Result<Vec<News>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// All comments on a news item, ordered by creation time ascending.
    async fn find_for_news(&self, news_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Find a comment only if the given user is its author.
    ///
    /// A non-owner gets `None` - indistinguishable from a nonexistent id,
    /// which is exactly how the HTTP layer must report it.
    async fn find_owned(&self, id: Uuid, author_id: Uuid) -> Result<Option<Comment>, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}
