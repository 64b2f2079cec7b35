//! Authentication middleware and extractors.
//!
//! Sessions are a signed token in an http-only cookie. Anonymous requests to
//! protected routes are not rejected with a 4xx - they are redirected to the
//! login page with a `next` parameter carrying the original path, the way a
//! browser-facing site behaves.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};
use std::sync::Arc;

use newsroom_core::ports::{TokenClaims, TokenService};

use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

const DEFAULT_LOGIN_URL: &str = "/api/auth/login";

/// Authenticated user identity extractor.
///
/// Use this in handlers to require authentication; anonymous requesters get
/// a login redirect instead of the handler running.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub email: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
        }
    }
}

/// Redirect issued when an anonymous requester hits a protected route.
#[derive(Debug)]
pub struct LoginRedirect {
    location: String,
}

impl LoginRedirect {
    fn to(login_url: &str, next: &str) -> Self {
        Self {
            location: format!("{login_url}?next={next}"),
        }
    }
}

impl std::fmt::Display for LoginRedirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "authentication required, redirecting to {}", self.location)
    }
}

impl actix_web::ResponseError for LoginRedirect {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::FOUND
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::Found()
            .insert_header((header::LOCATION, self.location.clone()))
            .finish()
    }
}

fn identity_from_request(req: &HttpRequest) -> Result<Identity, LoginRedirect> {
    let login_url = req
        .app_data::<web::Data<AppState>>()
        .map(|state| state.login_url.clone())
        .unwrap_or_else(|| DEFAULT_LOGIN_URL.to_string());
    let redirect = || LoginRedirect::to(&login_url, req.path());

    let Some(token_service) = req.app_data::<web::Data<Arc<dyn TokenService>>>() else {
        tracing::error!("TokenService not found in app data");
        return Err(redirect());
    };

    let Some(cookie) = req.cookie(SESSION_COOKIE) else {
        return Err(redirect());
    };

    match token_service.validate_token(cookie.value()) {
        Ok(claims) => Ok(Identity::from(claims)),
        Err(e) => {
            // Expired or tampered sessions behave exactly like no session.
            tracing::debug!("Rejected session token: {e}");
            Err(redirect())
        }
    }
}

impl FromRequest for Identity {
    type Error = LoginRedirect;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req))
    }
}

/// Optional identity extractor - doesn't fail if not authenticated.
pub struct OptionalIdentity(pub Option<Identity>);

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalIdentity(identity_from_request(req).ok())))
    }
}
