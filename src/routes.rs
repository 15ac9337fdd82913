//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /{code}`        - Short link redirect
//! - `GET    /health`        - Health check: store, counter queue, cache
//! - `POST   /api`           - Create a short URL
//! - `GET    /api/{id}`      - Fetch a record
//! - `DELETE /api/{id}`      - Delete a record
//! - `GET    /counter/{id}`  - Redirect count
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the routes and tracing layer without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::url_routes())
        .nest("/counter", api::routes::counter_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing, so `/api/` reaches the
/// create handler.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
