//! In-process page cache
//!
//! Process-wide map from request key to rendered page with an expiry
//! instant. Expired entries are dropped on lookup and whenever a new page
//! is stored. The map holds at most `max_entries` pages; when it is full a
//! third of the entries, those closest to expiry, are culled first.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::domain::ports::{CachedPage, PageCache};

/// Default entry limit
pub const DEFAULT_MAX_ENTRIES: usize = 300;

/// Fraction of entries (1/N) dropped when the cache is full
const CULL_FREQUENCY: usize = 3;

struct Entry {
    page: CachedPage,
    expires_at: Instant,
}

/// `RwLock`-guarded TTL map implementing `PageCache`
pub struct InMemoryPageCache {
    entries: RwLock<HashMap<String, Entry>>,
    max_entries: usize,
}

impl Default for InMemoryPageCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl InMemoryPageCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    /// Number of stored entries, expired ones included
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }
}

/// Make room for one more entry
fn evict(entries: &mut HashMap<String, Entry>, max_entries: usize, now: Instant) {
    entries.retain(|_, e| e.expires_at > now);
    if entries.len() < max_entries {
        return;
    }

    let mut by_expiry: Vec<(Instant, String)> = entries
        .iter()
        .map(|(key, e)| (e.expires_at, key.clone()))
        .collect();
    by_expiry.sort();

    let cull = (max_entries / CULL_FREQUENCY).max(1);
    for (_, key) in by_expiry.into_iter().take(cull) {
        entries.remove(&key);
    }
    tracing::debug!(culled = cull, remaining = entries.len(), "Page cache full");
}

#[async_trait]
impl PageCache for InMemoryPageCache {
    async fn get(&self, key: &str) -> Option<CachedPage> {
        let now = Instant::now();
        {
            let entries = self.entries.read().ok()?;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => return Some(entry.page.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: evict unless someone refreshed it in the meantime
        if let Ok(mut entries) = self.entries.write() {
            if entries.get(key).is_some_and(|e| e.expires_at <= now) {
                entries.remove(key);
            }
        }
        None
    }

    async fn put(&self, key: &str, page: CachedPage, ttl: Duration) {
        let now = Instant::now();
        let entry = Entry {
            page,
            expires_at: now + ttl,
        };
        match self.entries.write() {
            Ok(mut entries) => {
                if !entries.contains_key(key) {
                    evict(&mut entries, self.max_entries, now);
                }
                entries.insert(key.to_string(), entry);
            }
            Err(e) => tracing::warn!(error = %e, key, "Page cache lock poisoned, entry not stored"),
        }
    }

    async fn clear(&self) {
        match self.entries.write() {
            Ok(mut entries) => entries.clear(),
            Err(e) => tracing::warn!(error = %e, "Page cache lock poisoned, clear skipped"),
        }
    }
}
