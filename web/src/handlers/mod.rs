//! HTTP handlers
//!
//! Axum request handlers for the site's pages and form actions.

pub mod auth;
pub mod follow;
pub mod groups;
pub mod posts;
pub mod profile;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::domain::entities::PostId;
use crate::error::AppError;

pub use auth::{login, login_page, logout, signup};
pub use follow::follow_index;
pub use groups::group_posts;
pub use posts::{
    add_comment, create_post, create_post_page, delete_post, edit_post, edit_post_page, index,
    post_detail,
};
pub use profile::{profile, profile_follow, profile_unfollow};

/// `?page=N` on paginated feeds; kept raw so bad values fall back to page 1
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// 302 redirect to `location`
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Parse a post id path segment; anything non-numeric is an unknown post
fn parse_post_id(raw: &str) -> Result<PostId, AppError> {
    raw.parse::<i64>()
        .map(PostId)
        .map_err(|_| AppError::NotFound(format!("Post {} not found", raw)))
}

fn profile_url(username: &str) -> String {
    format!("/profile/{}/", urlencoding::encode(username))
}

fn post_url(id: &PostId) -> String {
    format!("/posts/{}/", id)
}
