//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod comment_repo;
pub mod follow_repo;
pub mod group_repo;
pub mod post_repo;
pub mod user_repo;


pub use comment_repo::PostgresCommentRepository;
pub use follow_repo::PostgresFollowRepository;
pub use group_repo::PostgresGroupRepository;
pub use post_repo::PostgresPostRepository;
pub use user_repo::PostgresUserRepository;
