//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod news;

#[cfg(test)]
mod tests;

use actix_web::{HttpResponse, http::header, web};
use uuid::Uuid;

use newsroom_core::domain::{Comment, News};
use newsroom_shared::dto::{CommentItem, NewsItem};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .service(
                        web::resource("/login")
                            .route(web::get().to(auth::login_form))
                            .route(web::post().to(auth::login)),
                    )
                    .service(
                        web::resource("/signup")
                            .route(web::get().to(auth::signup_form))
                            .route(web::post().to(auth::signup)),
                    )
                    .route("/logout", web::post().to(auth::logout)),
            )
            // News feed and comment threads
            .service(
                web::scope("/news")
                    .route("", web::get().to(news::home))
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(news::detail))
                            .route(web::post().to(news::create_comment)),
                    ),
            )
            // Comment ownership routes
            .service(
                web::scope("/comments")
                    .service(
                        web::resource("/{id}/edit")
                            .route(web::get().to(comments::edit_form))
                            .route(web::post().to(comments::update)),
                    )
                    .service(
                        web::resource("/{id}/delete")
                            .route(web::get().to(comments::confirm_delete))
                            .route(web::post().to(comments::remove)),
                    ),
            ),
    );
}

/// Redirect to a news detail page, anchored at the comment section.
pub(crate) fn redirect_to_comments(news_id: Uuid) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, format!("/api/news/{news_id}#comments")))
        .finish()
}

pub(crate) fn news_item(news: News) -> NewsItem {
    NewsItem {
        id: news.id,
        title: news.title,
        text: news.text,
        date: news.date,
    }
}

pub(crate) fn comment_item(comment: Comment) -> CommentItem {
    CommentItem {
        id: comment.id,
        news_id: comment.news_id,
        author_id: comment.author_id,
        text: comment.text,
        created: comment.created,
    }
}
