//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod comment;
pub mod follow;
pub mod group;
pub mod post;
pub mod user;

pub use comment::{Comment, CommentId, NewComment};
pub use follow::{Follow, FollowId};
pub use group::{Group, GroupId, GroupRef, NewGroup};
pub use post::{FeedScope, NewPost, Post, PostChanges, PostId};
pub use user::{is_valid_username, NewUser, User, UserId, UserRef, USERNAME_MAX_LEN};
