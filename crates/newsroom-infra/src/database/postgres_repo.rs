//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use newsroom_core::domain::{Comment, News, User};
use newsroom_core::error::RepoError;
use newsroom_core::ports::{CommentRepository, NewsRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::news::{self, Entity as NewsEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL news repository.
pub type PostgresNewsRepository = PostgresBaseRepository<NewsEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

#[async_trait]
impl NewsRepository for PostgresNewsRepository {
    async fn list_recent(&self, limit: u64) -> Result<Vec<News>, RepoError> {
        let result = NewsEntity::find()
            .order_by_desc(news::Column::Date)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_for_news(&self, news_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::NewsId.eq(news_id))
            .order_by_asc(comment::Column::Created)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_owned(&self, id: Uuid, author_id: Uuid) -> Result<Option<Comment>, RepoError> {
        // Ownership is part of the lookup itself, so a foreign comment is
        // indistinguishable from a missing one.
        let result = CommentEntity::find_by_id(id)
            .filter(comment::Column::AuthorId.eq(author_id))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}
