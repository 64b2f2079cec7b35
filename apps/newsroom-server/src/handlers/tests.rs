//! HTTP-level tests over in-memory repositories.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::Days;
use uuid::Uuid;

use newsroom_core::domain::{Comment, News, User};
use newsroom_core::moderation::{BannedWords, DEFAULT_BAD_WORDS, DEFAULT_WARNING};
use newsroom_core::ports::{
    BaseRepository, CommentRepository, PasswordService, TokenService, UserRepository,
};
use newsroom_infra::{
    Argon2PasswordService, InMemoryCommentRepository, InMemoryNewsRepository,
    InMemoryUserRepository, JwtConfig, JwtTokenService,
};
use newsroom_shared::dto::{AuthFormState, CommentEditResponse, NewsDetailResponse, NewsFeedResponse};

use crate::middleware::auth::SESSION_COOKIE;
use crate::state::AppState;

const PAGE_SIZE: u64 = 10;

struct TestContext {
    state: AppState,
    tokens: Arc<dyn TokenService>,
    passwords: Arc<dyn PasswordService>,
}

impl TestContext {
    fn new() -> Self {
        let state = AppState {
            news: Arc::new(InMemoryNewsRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            banned_words: Arc::new(BannedWords::default()),
            news_page_size: PAGE_SIZE,
            login_url: "/api/auth/login".to_string(),
        };

        Self {
            state,
            tokens: Arc::new(JwtTokenService::new(JwtConfig {
                secret: "test-secret-key".to_string(),
                expiration_hours: 1,
                issuer: "test-issuer".to_string(),
            })),
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }

    async fn seed_user(&self, email: &str) -> User {
        let hash = self.passwords.hash("pass").unwrap();
        let user = User::new(email.to_string(), hash);
        self.state.users.insert(user.clone()).await.unwrap();
        user
    }

    async fn seed_news(&self) -> News {
        let news = News::new("Заголовок".to_string(), "Текст новости".to_string());
        self.state.news.insert(news.clone()).await.unwrap();
        news
    }

    async fn seed_comment(&self, news: &News, author: &User, text: &str) -> Comment {
        let comment = Comment::new(news.id, author.id, text.to_string());
        self.state.comments.insert(comment.clone()).await.unwrap();
        comment
    }

    fn session_for(&self, user: &User) -> Cookie<'static> {
        let token = self.tokens.generate_token(user.id, &user.email).unwrap();
        Cookie::build(SESSION_COOKIE, token).path("/").finish()
    }

    async fn comment_count(&self, news_id: Uuid) -> usize {
        self.state
            .comments
            .find_for_news(news_id)
            .await
            .unwrap()
            .len()
    }
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.state.clone()))
                .app_data(web::Data::new($ctx.tokens.clone()))
                .app_data(web::Data::new($ctx.passwords.clone()))
                .configure(super::configure_routes),
        )
        .await
    };
}

fn location(resp: &actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

// ---------------------------------------------------------------------------
// Route availability
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_home_available_for_anonymous() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/news").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_detail_available_for_anonymous() {
    let ctx = TestContext::new();
    let news = ctx.seed_news().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/api/news/{}", news.id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_detail_unknown_id_is_not_found() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/api/news/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_edit_delete_available_for_author() {
    let ctx = TestContext::new();
    let author = ctx.seed_user("author@example.com").await;
    let news = ctx.seed_news().await;
    let comment = ctx.seed_comment(&news, &author, "Текст комментария").await;
    let app = init_app!(ctx);

    for action in ["edit", "delete"] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/comments/{}/{action}", comment.id))
            .cookie(ctx.session_for(&author))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[actix_web::test]
async fn test_anonymous_redirected_from_edit_delete() {
    let ctx = TestContext::new();
    let author = ctx.seed_user("author@example.com").await;
    let news = ctx.seed_news().await;
    let comment = ctx.seed_comment(&news, &author, "Текст комментария").await;
    let app = init_app!(ctx);

    for action in ["edit", "delete"] {
        let path = format!("/api/comments/{}/{action}", comment.id);
        let req = test::TestRequest::get().uri(&path).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), format!("/api/auth/login?next={path}"));
    }
}

#[actix_web::test]
async fn test_user_cannot_open_foreign_edit_delete() {
    let ctx = TestContext::new();
    let author = ctx.seed_user("author@example.com").await;
    let not_author = ctx.seed_user("reader@example.com").await;
    let news = ctx.seed_news().await;
    let comment = ctx.seed_comment(&news, &author, "Текст комментария").await;
    let app = init_app!(ctx);

    for action in ["edit", "delete"] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/comments/{}/{action}", comment.id))
            .cookie(ctx.session_for(&not_author))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

#[actix_web::test]
async fn test_auth_pages_available_for_anonymous() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    for path in ["/api/auth/login", "/api/auth/signup"] {
        let req = test::TestRequest::get().uri(path).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // Logout is POST-only; a GET falls back to POST like a method-not-allowed
    // probe would.
    let req = test::TestRequest::get().uri("/api/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let req = test::TestRequest::post().uri("/api/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn test_health_check() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_news_count_on_home_page() {
    let ctx = TestContext::new();
    for i in 0..PAGE_SIZE + 1 {
        ctx.state
            .news
            .insert(News::new(format!("Новость {i}"), "Текст".to_string()))
            .await
            .unwrap();
    }
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/news").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: NewsFeedResponse = test::read_body_json(resp).await;
    assert_eq!(body.news_feed.len(), PAGE_SIZE as usize);
}

#[actix_web::test]
async fn test_news_sorted_from_newest_to_oldest() {
    let ctx = TestContext::new();
    let today = chrono::Utc::now().date_naive();
    for i in 0..PAGE_SIZE + 1 {
        ctx.state
            .news
            .insert(News::with_date(
                format!("Новость {i}"),
                "Текст".to_string(),
                today - Days::new(i),
            ))
            .await
            .unwrap();
    }
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/news").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: NewsFeedResponse = test::read_body_json(resp).await;
    let dates: Vec<_> = body.news_feed.iter().map(|n| n.date).collect();
    assert!(dates.windows(2).all(|w| w[0] >= w[1]));
}

#[actix_web::test]
async fn test_comments_sorted_old_to_new() {
    let ctx = TestContext::new();
    let author = ctx.seed_user("author@example.com").await;
    let news = ctx.seed_news().await;
    ctx.seed_comment(&news, &author, "Старый").await;
    ctx.seed_comment(&news, &author, "Новый").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/api/news/{}", news.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: NewsDetailResponse = test::read_body_json(resp).await;
    assert_eq!(body.comments.len(), 2);
    assert_eq!(body.comments[0].text, "Старый");
    let created: Vec<_> = body.comments.iter().map(|c| c.created).collect();
    assert!(created.windows(2).all(|w| w[0] <= w[1]));
}

#[actix_web::test]
async fn test_anonymous_has_no_comment_form_on_detail() {
    let ctx = TestContext::new();
    let news = ctx.seed_news().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/api/news/{}", news.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: NewsDetailResponse = test::read_body_json(resp).await;
    assert!(body.form.is_none());
}

#[actix_web::test]
async fn test_authorized_has_comment_form_on_detail() {
    let ctx = TestContext::new();
    let author = ctx.seed_user("author@example.com").await;
    let news = ctx.seed_news().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/api/news/{}", news.id))
        .cookie(ctx.session_for(&author))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: NewsDetailResponse = test::read_body_json(resp).await;
    assert!(body.form.is_some());
}

// ---------------------------------------------------------------------------
// Comment lifecycle
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_anonymous_cannot_create_comment() {
    let ctx = TestContext::new();
    let news = ctx.seed_news().await;
    let app = init_app!(ctx);

    let path = format!("/api/news/{}", news.id);
    let req = test::TestRequest::post()
        .uri(&path)
        .set_json(serde_json::json!({"text": "Текст комментария"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/api/auth/login?next={path}"));
    assert_eq!(ctx.comment_count(news.id).await, 0);
}

#[actix_web::test]
async fn test_authorized_can_create_comment() {
    let ctx = TestContext::new();
    let author = ctx.seed_user("author@example.com").await;
    let news = ctx.seed_news().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/news/{}", news.id))
        .cookie(ctx.session_for(&author))
        .set_json(serde_json::json!({"text": "Текст комментария"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(location(&resp).ends_with("#comments"));

    let thread = ctx.state.comments.find_for_news(news.id).await.unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].text, "Текст комментария");
    assert_eq!(thread[0].author_id, author.id);
    assert_eq!(thread[0].news_id, news.id);
}

#[actix_web::test]
async fn test_comment_on_unknown_news_is_not_found() {
    let ctx = TestContext::new();
    let author = ctx.seed_user("author@example.com").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/news/{}", Uuid::new_v4()))
        .cookie(ctx.session_for(&author))
        .set_json(serde_json::json!({"text": "Текст комментария"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_bad_words_not_allowed() {
    let ctx = TestContext::new();
    let author = ctx.seed_user("author@example.com").await;
    let news = ctx.seed_news().await;
    let app = init_app!(ctx);

    let bad_text = format!("Какой-то текст, {}, ещё текст", DEFAULT_BAD_WORDS[0]);
    let req = test::TestRequest::post()
        .uri(&format!("/api/news/{}", news.id))
        .cookie(ctx.session_for(&author))
        .set_json(serde_json::json!({"text": &bad_text}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let body: NewsDetailResponse = test::read_body_json(resp).await;
    let form = body.form.expect("rejected submission keeps the form");
    assert_eq!(form.text, bad_text);
    assert_eq!(form.errors, vec![DEFAULT_WARNING.to_string()]);
    assert_eq!(ctx.comment_count(news.id).await, 0);
}

#[actix_web::test]
async fn test_author_can_edit_comment() {
    let ctx = TestContext::new();
    let author = ctx.seed_user("author@example.com").await;
    let news = ctx.seed_news().await;
    let comment = ctx.seed_comment(&news, &author, "Текст комментария").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/comments/{}/edit", comment.id))
        .cookie(ctx.session_for(&author))
        .set_json(serde_json::json!({"text": "Обновлённый комментарий"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(location(&resp).ends_with("#comments"));

    let stored = ctx
        .state
        .comments
        .find_by_id(comment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.text, "Обновлённый комментарий");
    assert_eq!(stored.author_id, author.id);
    assert_eq!(stored.created, comment.created);
    assert_eq!(ctx.comment_count(news.id).await, 1);
}

#[actix_web::test]
async fn test_bad_words_not_allowed_on_edit() {
    let ctx = TestContext::new();
    let author = ctx.seed_user("author@example.com").await;
    let news = ctx.seed_news().await;
    let comment = ctx.seed_comment(&news, &author, "Текст комментария").await;
    let app = init_app!(ctx);

    let bad_text = format!("Теперь ты {}", DEFAULT_BAD_WORDS[0]);
    let req = test::TestRequest::post()
        .uri(&format!("/api/comments/{}/edit", comment.id))
        .cookie(ctx.session_for(&author))
        .set_json(serde_json::json!({"text": bad_text}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let body: CommentEditResponse = test::read_body_json(resp).await;
    assert_eq!(body.form.errors, vec![DEFAULT_WARNING.to_string()]);

    let stored = ctx
        .state
        .comments
        .find_by_id(comment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.text, "Текст комментария");
}

#[actix_web::test]
async fn test_author_can_delete_comment() {
    let ctx = TestContext::new();
    let author = ctx.seed_user("author@example.com").await;
    let news = ctx.seed_news().await;
    let comment = ctx.seed_comment(&news, &author, "Текст комментария").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/comments/{}/delete", comment.id))
        .cookie(ctx.session_for(&author))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(location(&resp).ends_with("#comments"));
    assert_eq!(ctx.comment_count(news.id).await, 0);

    // The id is gone for its author too.
    let req = test::TestRequest::get()
        .uri(&format!("/api/comments/{}/edit", comment.id))
        .cookie(ctx.session_for(&author))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_user_cannot_edit_foreign_comment() {
    let ctx = TestContext::new();
    let author = ctx.seed_user("author@example.com").await;
    let not_author = ctx.seed_user("reader@example.com").await;
    let news = ctx.seed_news().await;
    let comment = ctx.seed_comment(&news, &author, "Текст комментария").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/comments/{}/edit", comment.id))
        .cookie(ctx.session_for(&not_author))
        .set_json(serde_json::json!({"text": "Чужой текст"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let stored = ctx
        .state
        .comments
        .find_by_id(comment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.text, "Текст комментария");
}

#[actix_web::test]
async fn test_user_cannot_delete_foreign_comment() {
    let ctx = TestContext::new();
    let author = ctx.seed_user("author@example.com").await;
    let not_author = ctx.seed_user("reader@example.com").await;
    let news = ctx.seed_news().await;
    let comment = ctx.seed_comment(&news, &author, "Текст комментария").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/comments/{}/delete", comment.id))
        .cookie(ctx.session_for(&not_author))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(ctx.comment_count(news.id).await, 1);
}

// ---------------------------------------------------------------------------
// Auth flows
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_signup_creates_user_and_starts_session() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(serde_json::json!({
            "email": "new@example.com",
            "password": "password123",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(set_cookie.starts_with("session="));

    let user = ctx
        .state
        .users
        .find_by_email("new@example.com")
        .await
        .unwrap();
    assert!(user.is_some());
}

#[actix_web::test]
async fn test_signup_duplicate_email_rerenders_form() {
    let ctx = TestContext::new();
    ctx.seed_user("taken@example.com").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(serde_json::json!({
            "email": "taken@example.com",
            "password": "password123",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: AuthFormState = test::read_body_json(resp).await;
    assert!(!body.errors.is_empty());
}

#[actix_web::test]
async fn test_login_bad_credentials_rerenders_form() {
    let ctx = TestContext::new();
    ctx.seed_user("author@example.com").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({
            "email": "author@example.com",
            "password": "wrong-password",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: AuthFormState = test::read_body_json(resp).await;
    assert!(!body.errors.is_empty());
}

#[actix_web::test]
async fn test_login_follows_next_parameter() {
    let ctx = TestContext::new();
    let author = ctx.seed_user("author@example.com").await;
    let news = ctx.seed_news().await;
    let comment = ctx.seed_comment(&news, &author, "Текст комментария").await;
    let app = init_app!(ctx);

    let next = format!("/api/comments/{}/edit", comment.id);
    let req = test::TestRequest::post()
        .uri(&format!("/api/auth/login?next={next}"))
        .set_json(serde_json::json!({
            "email": "author@example.com",
            "password": "pass",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), next);
}
