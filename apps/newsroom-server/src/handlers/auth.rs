//! Authentication handlers: login, signup, logout.
//!
//! Credential failures re-render the form with a 200, like any other form
//! validation; only successful submissions redirect.

use actix_web::{HttpResponse, cookie::Cookie, http::header, web};
use serde::Deserialize;
use std::sync::Arc;

use newsroom_core::domain::User;
use newsroom_core::ports::{BaseRepository, PasswordService, TokenService, UserRepository};
use newsroom_shared::dto::{AuthFormState, LoginRequest, SignupRequest};

use crate::middleware::auth::SESSION_COOKIE;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const HOME_URL: &str = "/api/news";

/// Where to send the user after a successful login.
#[derive(Debug, Deserialize)]
pub struct NextParam {
    pub next: Option<String>,
}

/// GET /api/auth/login
pub async fn login_form() -> HttpResponse {
    HttpResponse::Ok().json(AuthFormState::default())
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    query: web::Query<NextParam>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let Some(user) = state.users.find_by_email(&req.email).await? else {
        return Ok(login_failed(req.email));
    };

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Ok(login_failed(req.email));
    }

    let token = token_service
        .generate_token(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let location = query
        .into_inner()
        .next
        .unwrap_or_else(|| HOME_URL.to_string());

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(HttpResponse::Found()
        .cookie(session_cookie(token))
        .insert_header((header::LOCATION, location))
        .finish())
}

/// GET /api/auth/signup
pub async fn signup_form() -> HttpResponse {
    HttpResponse::Ok().json(AuthFormState::default())
}

/// POST /api/auth/signup
pub async fn signup(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.email.is_empty() || !req.email.contains('@') {
        return Ok(form_error(req.email, "Invalid email address"));
    }
    if req.password.len() < 8 {
        return Ok(form_error(
            req.email,
            "Password must be at least 8 characters",
        ));
    }

    // Check if user already exists
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Ok(form_error(req.email, "Email already registered"));
    }

    // Hash password
    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Create user
    let user = User::new(req.email, password_hash);
    let saved = state.users.insert(user).await?;

    let token = token_service
        .generate_token(saved.id, &saved.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = %saved.id, "User registered");

    Ok(HttpResponse::Found()
        .cookie(session_cookie(token))
        .insert_header((header::LOCATION, HOME_URL))
        .finish())
}

/// POST /api/auth/logout
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();

    HttpResponse::Found()
        .cookie(cookie)
        .insert_header((header::LOCATION, HOME_URL))
        .finish()
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .finish()
}

fn login_failed(email: String) -> HttpResponse {
    form_error(email, "Invalid email or password")
}

fn form_error(email: String, error: &str) -> HttpResponse {
    HttpResponse::Ok().json(AuthFormState::with_error(email, error))
}
