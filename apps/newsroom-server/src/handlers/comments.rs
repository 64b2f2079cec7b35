//! Comment edit and delete handlers.
//!
//! Both routes are owner-only. The lookup is scoped to the requesting
//! author, so a foreign comment produces the same 404 as a nonexistent id -
//! non-owners learn nothing about what exists.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use newsroom_core::domain::Comment;
use newsroom_core::ports::{BaseRepository, CommentRepository};
use newsroom_shared::dto::{
    CommentDeleteResponse, CommentEditResponse, CommentFormData, CommentFormState,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::news::validation_warning;
use super::{comment_item, redirect_to_comments};

/// GET /api/comments/{id}/edit
///
/// The edit form, pre-filled with the comment's current text.
pub async fn edit_form(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let comment = find_owned(&state, path.into_inner(), &identity).await?;

    let form = CommentFormState {
        text: comment.text.clone(),
        errors: Vec::new(),
    };

    Ok(HttpResponse::Ok().json(CommentEditResponse {
        comment: comment_item(comment),
        form,
    }))
}

/// POST /api/comments/{id}/edit
///
/// Overwrite the comment's text. Author, news, and creation time never
/// change. The banned-word filter applies here as on creation.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
    body: web::Json<CommentFormData>,
) -> AppResult<HttpResponse> {
    let mut comment = find_owned(&state, path.into_inner(), &identity).await?;
    let data = body.into_inner();

    if let Err(err) = state.banned_words.check(&data.text) {
        let warning = validation_warning(err)?;
        let form = CommentFormState::with_error(data.text, warning);
        return Ok(HttpResponse::Ok().json(CommentEditResponse {
            comment: comment_item(comment),
            form,
        }));
    }

    comment.text = data.text;
    let news_id = comment.news_id;
    state.comments.update(comment).await?;

    tracing::info!(author_id = %identity.user_id, "Comment updated");

    Ok(redirect_to_comments(news_id))
}

/// GET /api/comments/{id}/delete
///
/// Deletion confirmation. Nothing is removed on GET.
pub async fn confirm_delete(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let comment = find_owned(&state, path.into_inner(), &identity).await?;

    Ok(HttpResponse::Ok().json(CommentDeleteResponse {
        comment: comment_item(comment),
    }))
}

/// POST /api/comments/{id}/delete
///
/// Permanently remove the comment.
pub async fn remove(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let comment = find_owned(&state, path.into_inner(), &identity).await?;

    state.comments.delete(comment.id).await?;

    tracing::info!(author_id = %identity.user_id, "Comment deleted");

    Ok(redirect_to_comments(comment.news_id))
}

async fn find_owned(
    state: &AppState,
    id: Uuid,
    identity: &Identity,
) -> Result<Comment, AppError> {
    state
        .comments
        .find_owned(id, identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Comment with id {id} not found")))
}
