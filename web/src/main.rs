//! Yatube web server
//!
//! A small blogging site: users publish posts, file them under groups,
//! comment and follow each other. Uses hexagonal (ports & adapters)
//! architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod cache;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;
mod render;

#[cfg(test)]
mod test_utils;


use adapters::{
    InMemoryPageCache, PostgresCommentRepository, PostgresFollowRepository,
    PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository,
};
use app::{FeedService, FollowService, PostService, UserService};
use config::Config;
use domain::ports::PageCache;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub feed_service: Arc<FeedService>,
    pub post_service: Arc<PostService>,
    pub follow_service: Arc<FollowService>,
    pub page_cache: Arc<dyn PageCache>,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Registration route, rate limited by the caller
pub fn signup_routes() -> Router<AppState> {
    Router::new().route("/auth/signup/", post(handlers::signup))
}

/// Build the application router around `signup`
pub fn router(state: AppState, signup: Router<AppState>) -> Router {
    // Public pages, cached by URL
    let cached_routes = Router::new()
        .route("/", get(handlers::index))
        .route("/group/:slug/", get(handlers::group_posts))
        .route("/profile/:username/", get(handlers::profile))
        .route("/posts/:id/", get(handlers::post_detail))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            cache::cache_page,
        ));

    // Pages that need a logged-in user
    let protected_routes = Router::new()
        .route(
            "/create/",
            get(handlers::create_post_page).post(handlers::create_post),
        )
        .route(
            "/posts/:id/edit/",
            get(handlers::edit_post_page).post(handlers::edit_post),
        )
        .route("/posts/:id/delete/", post(handlers::delete_post))
        .route("/posts/:id/comment/", post(handlers::add_comment))
        .route("/follow/", get(handlers::follow_index))
        .route("/profile/:username/follow/", post(handlers::profile_follow))
        .route(
            "/profile/:username/unfollow/",
            post(handlers::profile_unfollow),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_user,
        ));

    Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Accounts
        .route(
            "/auth/login/",
            get(handlers::login_page).post(handlers::login),
        )
        .route("/auth/logout/", post(handlers::logout))
        .merge(signup)
        .merge(cached_routes)
        .merge(protected_routes)
        // Middleware
        .layer(auth::session_layer(state.config.secure_cookies))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,yatube_web=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Yatube...");

    // Load configuration
    let config = Config::from_env()?;
    if config.secure_cookies {
        tracing::info!("Secure cookies enabled - session cookies are sent over HTTPS only");
    } else {
        tracing::warn!("Secure cookies disabled - set SECURE_COOKIES=true behind HTTPS");
    }

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let user_repo = Arc::new(PostgresUserRepository::new(db.clone()));
    let group_repo = Arc::new(PostgresGroupRepository::new(db.clone()));
    let post_repo = Arc::new(PostgresPostRepository::new(db.clone()));
    let comment_repo = Arc::new(PostgresCommentRepository::new(db.clone()));
    let follow_repo = Arc::new(PostgresFollowRepository::new(db.clone()));

    // Create application services
    let user_service = Arc::new(UserService::new(user_repo.clone()));

    let feed_service = Arc::new(FeedService::new(
        post_repo.clone(),
        group_repo.clone(),
        user_repo.clone(),
        comment_repo.clone(),
    ));

    let post_service = Arc::new(PostService::new(
        post_repo.clone(),
        group_repo.clone(),
        comment_repo.clone(),
    ));

    let follow_service = Arc::new(FollowService::new(follow_repo, user_repo));

    // Create app state
    let state = AppState {
        user_service,
        feed_service,
        post_service,
        follow_service,
        page_cache: Arc::new(InMemoryPageCache::new(config.cache_max_entries)),
        config: config.clone(),
    };

    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .context("Failed to build governor config")?,
    );

    let signup = signup_routes().layer(GovernorLayer {
        config: governor_config,
    });

    let app = router(state, signup);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
