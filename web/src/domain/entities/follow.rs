//! Follow domain entity
//!
//! A directed edge: `user` receives `author`'s posts in their following feed.
//! At most one edge exists per `(user, author)` pair and `user != author`.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Unique identifier for a follow edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FollowId(pub i64);

impl From<i64> for FollowId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for FollowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A follow edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Follow {
    pub id: FollowId,
    pub user_id: UserId,
    pub author_id: UserId,
}
