//! Account handlers
//!
//! Signup issues a session token and logs the new user in; login exchanges a
//! token for a session; logout ends it.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::auth::{log_in, log_out};
use crate::error::AppError;
use crate::render::{render_login, render_signup};
use crate::AppState;

use super::found;

const INVALID_TOKEN: &str = "Неверный токен";

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub token: String,
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
}

/// Only same-site paths are accepted as a post-login destination
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/",
    }
}

/// GET /auth/login/
pub async fn login_page(Query(query): Query<LoginQuery>) -> Result<Html<String>, AppError> {
    Ok(Html(render_login(query.next.as_deref(), None)?))
}

/// POST /auth/login/
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let Some(user) = state.user_service.authenticate(form.token.trim()).await? else {
        tracing::debug!("Login with unknown token");
        let page = render_login(form.next.as_deref(), Some(INVALID_TOKEN))?;
        return Ok(Html(page).into_response());
    };

    log_in(&session, &user).await?;
    tracing::info!(username = %user.username, "User logged in");

    Ok(found(safe_next(form.next.as_deref())))
}

/// POST /auth/signup/
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Html<String>, AppError> {
    let (user, token) = state.user_service.register(&form.username).await?;
    log_in(&session, &user).await?;

    Ok(Html(render_signup(&user, &token)?))
}

/// POST /auth/logout/
pub async fn logout(session: Session) -> Result<Response, AppError> {
    log_out(&session).await?;
    Ok(found("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_must_be_a_local_path() {
        assert_eq!(safe_next(Some("/create/")), "/create/");
        assert_eq!(safe_next(Some("https://evil.example")), "/");
        assert_eq!(safe_next(Some("//evil.example")), "/");
        assert_eq!(safe_next(None), "/");
    }
}
