//! Comment domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PostId, UserId, UserRef};

/// Unique identifier for a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommentId(pub i64);

impl From<i64> for CommentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A comment on a post
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub created: DateTime<Utc>,
    pub author: UserRef,
    pub post_id: PostId,
}

/// Data needed to create a new comment; `created` is assigned by the store
#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub author_id: UserId,
    pub post_id: PostId,
}
