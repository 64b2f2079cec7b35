//! In-memory repository implementations.
//!
//! Used as the fallback when no database is configured, and by the server's
//! handler tests. Data is lost on process restart. Each store keeps
//! insertion order, so ordering ties stay stable.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use newsroom_core::domain::{Comment, News, User};
use newsroom_core::error::RepoError;
use newsroom_core::ports::{
    BaseRepository, CommentRepository, NewsRepository, UserRepository,
};

/// In-memory news store backed by a Vec under an async RwLock.
#[derive(Default)]
pub struct InMemoryNewsRepository {
    store: RwLock<Vec<News>>,
}

impl InMemoryNewsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<News, Uuid> for InMemoryNewsRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<News>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|n| n.id == id).cloned())
    }

    async fn insert(&self, entity: News) -> Result<News, RepoError> {
        let mut store = self.store.write().await;
        if store.iter().any(|n| n.id == entity.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        store.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: News) -> Result<News, RepoError> {
        let mut store = self.store.write().await;
        let slot = store
            .iter_mut()
            .find(|n| n.id == entity.id)
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|n| n.id != id);
        if store.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl NewsRepository for InMemoryNewsRepository {
    async fn list_recent(&self, limit: u64) -> Result<Vec<News>, RepoError> {
        let store = self.store.read().await;
        let mut feed: Vec<News> = store.clone();
        // Stable sort keeps insertion order for equal dates.
        feed.sort_by(|a, b| b.date.cmp(&a.date));
        feed.truncate(limit as usize);
        Ok(feed)
    }
}

/// In-memory comment store.
#[derive(Default)]
pub struct InMemoryCommentRepository {
    store: RwLock<Vec<Comment>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, entity: Comment) -> Result<Comment, RepoError> {
        let mut store = self.store.write().await;
        if store.iter().any(|c| c.id == entity.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        store.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: Comment) -> Result<Comment, RepoError> {
        let mut store = self.store.write().await;
        let slot = store
            .iter_mut()
            .find(|c| c.id == entity.id)
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|c| c.id != id);
        if store.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_for_news(&self, news_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let store = self.store.read().await;
        let mut thread: Vec<Comment> = store.iter().filter(|c| c.news_id == news_id).cloned().collect();
        thread.sort_by(|a, b| a.created.cmp(&b.created));
        Ok(thread)
    }

    async fn find_owned(&self, id: Uuid, author_id: Uuid) -> Result<Option<Comment>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .iter()
            .find(|c| c.id == id && c.author_id == author_id)
            .cloned())
    }
}

/// In-memory user store.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, entity: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        // Mirrors the unique index on users.email.
        if store
            .iter()
            .any(|u| u.id == entity.id || u.email == entity.email)
        {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        store.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        let slot = store
            .iter_mut()
            .find(|u| u.id == entity.id)
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|u| u.id != id);
        if store.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|u| u.email == email).cloned())
    }
}
