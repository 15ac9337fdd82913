//! API route configuration.

use crate::api::handlers::{
    counter_handler, create_url_handler, delete_url_handler, get_url_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Record management routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST   /`      - Create a short URL
/// - `GET    /{id}`  - Fetch a record
/// - `DELETE /{id}`  - Delete a record
pub fn url_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_url_handler))
        .route("/{id}", get(get_url_handler).delete(delete_url_handler))
}

/// Counter routes, nested under `/counter`.
///
/// - `GET /{id}` - Redirect count of a record
pub fn counter_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(counter_handler))
}
