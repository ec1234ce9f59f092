//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).
//!
//! Referential behaviour every implementation must honour:
//! - deleting a post deletes its comments
//! - deleting a group detaches its posts (`group` becomes `None`)
//! - deleting a user deletes their posts, comments and follow edges
//! - at most one follow edge exists per `(user, author)` pair

use async_trait::async_trait;

use crate::domain::entities::{
    Comment, FeedScope, Follow, Group, GroupId, NewComment, NewGroup, NewPost, NewUser, Post,
    PostChanges, PostId, User, UserId,
};
use crate::error::DomainError;

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by session token hash
    async fn find_by_token_hash(&self, hash: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user. Fails with `AlreadyExists` if the username is taken.
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Delete a user and everything they own. Returns false if absent.
    async fn delete(&self, id: &UserId) -> Result<bool, DomainError>;
}

/// Repository for Group entities
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Find a group by ID
    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, DomainError>;

    /// Find a group by slug
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, DomainError>;

    /// List all groups ordered by title
    async fn list(&self) -> Result<Vec<Group>, DomainError>;

    /// Create a new group. Fails with `AlreadyExists` if the slug is taken.
    async fn create(&self, group: &NewGroup) -> Result<Group, DomainError>;

    /// Delete a group, detaching its posts. Returns false if absent.
    async fn delete(&self, id: &GroupId) -> Result<bool, DomainError>;
}

/// Repository for Post entities
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by ID
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError>;

    /// Posts in scope, newest `pub_date` first (ties: newest id first)
    async fn find_page(
        &self,
        scope: &FeedScope,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Post>, DomainError>;

    /// Number of posts in scope
    async fn count(&self, scope: &FeedScope) -> Result<u64, DomainError>;

    /// Create a new post stamped with the current time
    async fn create(&self, post: &NewPost) -> Result<Post, DomainError>;

    /// Apply changes to text, group and image; `pub_date` is left untouched
    async fn update(&self, id: &PostId, changes: &PostChanges) -> Result<Post, DomainError>;

    /// Delete a post and its comments. Returns false if absent.
    async fn delete(&self, id: &PostId) -> Result<bool, DomainError>;
}

/// Repository for Comment entities
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments on a post, newest first
    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>, DomainError>;

    /// Create a new comment stamped with the current time
    async fn create(&self, comment: &NewComment) -> Result<Comment, DomainError>;
}

/// Repository for Follow edges
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Atomically fetch or insert the `(user, author)` edge.
    /// The flag is true when this call created it.
    async fn get_or_create(
        &self,
        user_id: &UserId,
        author_id: &UserId,
    ) -> Result<(Follow, bool), DomainError>;

    /// Remove the `(user, author)` edge. Returns false if there was none.
    async fn delete(&self, user_id: &UserId, author_id: &UserId) -> Result<bool, DomainError>;

    /// Authors followed by `user`
    async fn find_followed_authors(&self, user_id: &UserId) -> Result<Vec<UserId>, DomainError>;
}
