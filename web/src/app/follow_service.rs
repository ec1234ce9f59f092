//! Follow service
//!
//! Manages subscriptions between users and authors.

use std::sync::Arc;

use crate::domain::entities::{User, UserId};
use crate::domain::ports::{FollowRepository, UserRepository};
use crate::error::AppError;

/// Result of a follow request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    Created,
    AlreadyFollowing,
    /// Following yourself is silently ignored
    SelfFollow,
}

/// Service for follow edges
pub struct FollowService {
    follows: Arc<dyn FollowRepository>,
    users: Arc<dyn UserRepository>,
}

impl FollowService {
    pub fn new(follows: Arc<dyn FollowRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { follows, users }
    }

    /// Subscribe `user` to the author named `username`
    pub async fn follow(&self, user: &User, username: &str) -> Result<FollowOutcome, AppError> {
        let author = self.find_author(username).await?;

        if author.id == user.id {
            tracing::debug!(user_id = %user.id, "Ignoring self-follow");
            return Ok(FollowOutcome::SelfFollow);
        }

        let (_, created) = self.follows.get_or_create(&user.id, &author.id).await?;
        if !created {
            return Ok(FollowOutcome::AlreadyFollowing);
        }

        tracing::info!(
            user_id = %user.id,
            author_id = %author.id,
            "Follow created"
        );

        Ok(FollowOutcome::Created)
    }

    /// Remove the subscription if present. Returns whether an edge was removed.
    pub async fn unfollow(&self, user: &User, username: &str) -> Result<bool, AppError> {
        let author = self.find_author(username).await?;

        let removed = self.follows.delete(&user.id, &author.id).await?;
        if removed {
            tracing::info!(
                user_id = %user.id,
                author_id = %author.id,
                "Follow removed"
            );
        }

        Ok(removed)
    }

    /// Ids of every author `user` follows
    pub async fn followed_authors(&self, user: &User) -> Result<Vec<UserId>, AppError> {
        Ok(self.follows.find_followed_authors(&user.id).await?)
    }

    async fn find_author(&self, username: &str) -> Result<User, AppError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))
    }
}
