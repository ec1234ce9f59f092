//! Group handlers

use axum::{
    extract::{Path, Query, State},
    response::Html,
};

use crate::error::AppError;
use crate::render::render_group;
use crate::AppState;

use super::PageQuery;

/// GET /group/:slug/
pub async fn group_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let feed = state.feed_service.group(&slug, query.page.as_deref()).await?;
    Ok(Html(render_group(&feed)?))
}
