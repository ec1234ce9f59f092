//! SeaORM entities
//!
//! Table models mirroring `migrations/0001_initial.sql`.

pub mod comments;
pub mod follows;
pub mod groups;
pub mod posts;
pub mod users;
