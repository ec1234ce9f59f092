//! Following feed handler

use axum::{
    extract::{Query, State},
    response::Html,
    Extension,
};

use crate::domain::entities::User;
use crate::error::AppError;
use crate::render::render_follow_index;
use crate::AppState;

use super::PageQuery;

/// GET /follow/
///
/// Posts by every author the current user follows. Not cached: the
/// content depends on who is asking.
pub async fn follow_index(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let authors = state.follow_service.followed_authors(&user).await?;
    let page = state
        .feed_service
        .following(authors, query.page.as_deref())
        .await?;
    Ok(Html(render_follow_index(&page)?))
}
