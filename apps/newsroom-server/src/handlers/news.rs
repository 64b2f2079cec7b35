//! News feed handlers: home listing, detail pages, comment submission.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use newsroom_core::DomainError;
use newsroom_core::domain::{Comment, News};
use newsroom_core::ports::{BaseRepository, CommentRepository, NewsRepository};
use newsroom_shared::dto::{
    CommentFormData, CommentFormState, NewsDetailResponse, NewsFeedResponse,
};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::{comment_item, news_item, redirect_to_comments};

/// GET /api/news
///
/// The most recent news, newest first, capped at the configured count.
pub async fn home(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let feed = state.news.list_recent(state.news_page_size).await?;

    Ok(HttpResponse::Ok().json(NewsFeedResponse {
        news_feed: feed.into_iter().map(news_item).collect(),
    }))
}

/// GET /api/news/{id}
///
/// The article plus its comment thread, oldest comment first. Authenticated
/// requesters also get an empty submission form; anonymous requesters don't.
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let news = find_news(&state, id).await?;

    let form = identity.0.map(|_| CommentFormState::default());

    Ok(HttpResponse::Ok().json(detail_response(&state, news, form).await?))
}

/// POST /api/news/{id}
///
/// Submit a comment on the article. Anonymous requesters are redirected to
/// the login page before this handler runs. A banned word re-renders the
/// detail payload with the submitted text and a field error, with nothing
/// persisted; success inserts exactly one comment and redirects to the
/// detail page anchored at the comment section.
pub async fn create_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
    body: web::Json<CommentFormData>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let news = find_news(&state, id).await?;
    let data = body.into_inner();

    if let Err(err) = state.banned_words.check(&data.text) {
        let warning = validation_warning(err)?;
        let form = CommentFormState::with_error(data.text, warning);
        return Ok(HttpResponse::Ok().json(detail_response(&state, news, Some(form)).await?));
    }

    let comment = Comment::new(news.id, identity.user_id, data.text);
    state.comments.insert(comment).await?;

    tracing::info!(news_id = %news.id, author_id = %identity.user_id, "Comment created");

    Ok(redirect_to_comments(news.id))
}

async fn find_news(state: &AppState, id: Uuid) -> Result<News, AppError> {
    state
        .news
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("News with id {id} not found")))
}

async fn detail_response(
    state: &AppState,
    news: News,
    form: Option<CommentFormState>,
) -> Result<NewsDetailResponse, AppError> {
    let comments = state.comments.find_for_news(news.id).await?;

    Ok(NewsDetailResponse {
        news: news_item(news),
        comments: comments.into_iter().map(comment_item).collect(),
        form,
    })
}

/// Unwrap the warning out of a failed moderation check.
pub(super) fn validation_warning(err: DomainError) -> Result<String, AppError> {
    match err {
        DomainError::Validation(warning) => Ok(warning),
        other => Err(other.into()),
    }
}
