use std::env;
use std::time::Duration;

use anyhow::Context;

use crate::adapters::memory::DEFAULT_MAX_ENTRIES;

/// Default lifetime of a cached page (15 minutes)
const DEFAULT_CACHE_TTL_SECS: u64 = 60 * 15;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Port the HTTP server binds to
    pub port: u16,
    /// How long rendered feed pages stay cached
    pub cache_ttl: Duration,
    /// Upper bound on cached pages
    pub cache_max_entries: usize,
    /// Where unauthenticated users are sent for protected pages
    pub login_url: String,
    /// Mark the session cookie `Secure`
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let port = match env::var("PORT") {
            Ok(p) => p.parse().with_context(|| format!("invalid PORT: {}", p))?,
            Err(_) => 8080,
        };

        let cache_ttl_secs = match env::var("CACHE_TTL_SECS") {
            Ok(s) => s
                .parse()
                .with_context(|| format!("invalid CACHE_TTL_SECS: {}", s))?,
            Err(_) => DEFAULT_CACHE_TTL_SECS,
        };

        let cache_max_entries = match env::var("CACHE_MAX_ENTRIES") {
            Ok(s) => s
                .parse()
                .with_context(|| format!("invalid CACHE_MAX_ENTRIES: {}", s))?,
            Err(_) => DEFAULT_MAX_ENTRIES,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            cache_max_entries,
            login_url: env::var("LOGIN_URL").unwrap_or_else(|_| "/auth/login/".to_string()),
            secure_cookies: env::var("SECURE_COOKIES")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
        })
    }
}
