//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - mockall has lifetime issues with traits containing `&str` parameters
//! - one in-memory store can honour the cascade rules across all tables
//! - We control exactly what they return without macro magic
//!
//! Services hold repositories as trait objects, so the same `AppState`
//! type serves both production and router tests.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
