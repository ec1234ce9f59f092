//! Session authentication
//!
//! Browser logins live in a server-side session (`tower-sessions`) whose id
//! travels in the `sessionid` cookie; the session stores the user id. API
//! clients may instead send `Authorization: Bearer <token>`.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::domain::entities::{User, UserId};
use crate::error::AppError;
use crate::handlers::found;
use crate::AppState;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "sessionid";

/// Idle time after which a session expires (two weeks)
const SESSION_AGE_DAYS: i64 = 14;

const USER_ID_KEY: &str = "user_id";

/// Cookie-backed session layer with an in-process store
pub fn session_layer(secure: bool) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_secure(secure)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_AGE_DAYS)))
}

fn session_error(e: tower_sessions::session::Error) -> AppError {
    AppError::Internal(format!("Session store error: {}", e))
}

/// Bind `session` to `user` under a fresh session id
pub async fn log_in(session: &Session, user: &User) -> Result<(), AppError> {
    session.cycle_id().await.map_err(session_error)?;
    session
        .insert(USER_ID_KEY, user.id.0)
        .await
        .map_err(session_error)
}

/// Drop the session and its data
pub async fn log_out(session: &Session) -> Result<(), AppError> {
    session.flush().await.map_err(session_error)
}

/// Extract a bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Redirect to the login page, remembering where the user was going
pub fn login_redirect(login_url: &str, next: &str) -> Response {
    found(&format!("{}?next={}", login_url, urlencoding::encode(next)))
}

async fn current_user(
    state: &AppState,
    session: &Session,
    headers: &HeaderMap,
) -> Result<Option<User>, AppError> {
    if let Some(id) = session.get::<i64>(USER_ID_KEY).await.map_err(session_error)? {
        if let Some(user) = state.user_service.get_by_id(&UserId(id)).await? {
            return Ok(Some(user));
        }
    }

    match bearer_token(headers) {
        Some(token) => state.user_service.authenticate(token).await,
        None => Ok(None),
    }
}

/// Authentication middleware
///
/// Resolves the session (or bearer token) and injects the User into request
/// extensions. Anonymous requests are redirected to the login page.
pub async fn require_user(
    State(state): State<AppState>,
    session: Session,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(user) = current_user(&state, &session, request.headers()).await? else {
        let target = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        tracing::debug!(path = %target, "Anonymous request to protected page");
        return Ok(login_redirect(&state.config.login_url, target).into_response());
    };

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
