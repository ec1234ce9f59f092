//! In-process adapters

pub mod page_cache;

pub use page_cache::{InMemoryPageCache, DEFAULT_MAX_ENTRIES};
