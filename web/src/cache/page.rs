//! Page caching middleware
//!
//! Successful GET responses are stored under their path and query string
//! for the configured TTL and replayed verbatim until they expire or the
//! cache is cleared. Nothing is invalidated on writes.

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::ports::CachedPage;
use crate::error::AppError;
use crate::AppState;

/// Serve from the page cache, or render and store
pub async fn cache_page(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if request.method() != Method::GET {
        return Ok(next.run(request).await);
    }

    let key = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    if let Some(page) = state.page_cache.get(&key).await {
        tracing::debug!(key = %key, "Page cache hit");
        return Ok(replay(page));
    }
    tracing::debug!(key = %key, "Page cache miss");

    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return Ok(response);
    }

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to buffer response body: {}", e)))?;

    let page = CachedPage {
        content_type: parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: bytes.to_vec(),
    };
    state
        .page_cache
        .put(&key, page, state.config.cache_ttl)
        .await;
    tracing::debug!(key = %key, ttl_secs = state.config.cache_ttl.as_secs(), "Page cached");

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

fn replay(page: CachedPage) -> Response {
    let mut response = Body::from(page.body).into_response();
    if let Some(content_type) = page
        .content_type
        .and_then(|ct| HeaderValue::from_str(&ct).ok())
    {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    response
}
