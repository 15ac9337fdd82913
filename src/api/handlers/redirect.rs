//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the code through the cache-aside repository
/// 2. Queue a counter increment (waits only if the counter queue is full)
/// 3. Return 302 Found
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let url = state
        .shortening_service
        .resolve(&code)
        .await?
        .ok_or_else(|| AppError::not_found("short url not found", json!({ "code": code })))?;

    state.shortening_service.notify_resolved(&code).await;

    Ok((StatusCode::FOUND, [(header::LOCATION, url)]))
}
