//! Page cache port
//!
//! A key-value store of rendered responses with a per-entry time to live.
//! Entries are never invalidated by writes; they expire or get cleared.

use std::time::Duration;

use async_trait::async_trait;

/// A rendered response body as it was first served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPage {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait PageCache: Send + Sync {
    /// Fetch a live entry; expired entries are treated as absent
    async fn get(&self, key: &str) -> Option<CachedPage>;

    /// Store `page` under `key` for `ttl`, replacing any previous entry
    async fn put(&self, key: &str, page: CachedPage, ttl: Duration);

    /// Drop every entry
    async fn clear(&self);
}
