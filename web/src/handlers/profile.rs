//! Profile handlers
//!
//! An author's feed and the follow/unfollow actions on it.

use axum::{
    extract::{Path, Query, State},
    response::{Html, Response},
    Extension,
};

use crate::domain::entities::User;
use crate::error::AppError;
use crate::render::render_profile;
use crate::AppState;

use super::{found, profile_url, PageQuery};

/// GET /profile/:username/
pub async fn profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let feed = state
        .feed_service
        .profile(&username, query.page.as_deref())
        .await?;
    Ok(Html(render_profile(&feed)?))
}

/// POST /profile/:username/follow/
pub async fn profile_follow(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(username): Path<String>,
) -> Result<Response, AppError> {
    state.follow_service.follow(&user, &username).await?;
    Ok(found(&profile_url(&username)))
}

/// POST /profile/:username/unfollow/
pub async fn profile_unfollow(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(username): Path<String>,
) -> Result<Response, AppError> {
    state.follow_service.unfollow(&user, &username).await?;
    Ok(found(&profile_url(&username)))
}
