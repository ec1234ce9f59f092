//! Test fixtures
//!
//! Application state wired to an `InMemoryStore`, for router-level tests.

use std::sync::Arc;
use std::time::Duration;

use crate::adapters::InMemoryPageCache;
use crate::app::{FeedService, FollowService, PostService, UserService};
use crate::config::Config;
use crate::AppState;

use super::InMemoryStore;

/// Session token that `InMemoryStore::seed_user` assigns to `username`
pub fn token_for(username: &str) -> String {
    format!("yt-test-{}", username)
}

/// Configuration that never touches the environment
pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        port: 0,
        cache_ttl: Duration::from_secs(900),
        cache_max_entries: 300,
        login_url: "/auth/login/".to_string(),
        secure_cookies: false,
    }
}

/// Services over `store` with a fresh page cache
pub fn test_state(store: &Arc<InMemoryStore>) -> AppState {
    let config = test_config();
    AppState {
        user_service: Arc::new(UserService::new(store.clone())),
        feed_service: Arc::new(FeedService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        )),
        post_service: Arc::new(PostService::new(store.clone(), store.clone(), store.clone())),
        follow_service: Arc::new(FollowService::new(store.clone(), store.clone())),
        page_cache: Arc::new(InMemoryPageCache::new(config.cache_max_entries)),
        config,
    }
}
