//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `pagination`: Page arithmetic shared by every feed
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod pagination;
pub mod ports;
