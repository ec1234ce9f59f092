//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod feed_service;
pub mod follow_service;
pub mod forms;
pub mod post_service;
pub mod user_service;

pub use feed_service::{FeedService, GroupFeed, PostDetail, ProfileFeed};
pub use follow_service::FollowService;
pub use forms::{CommentForm, FormErrors, PostForm};
pub use post_service::{EditAccess, EditOutcome, PostService, Submission};
pub use user_service::UserService;
