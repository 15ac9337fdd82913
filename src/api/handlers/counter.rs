//! Handler for the redirect counter endpoint.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::counter::CounterResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns how many redirects a record has served.
///
/// # Endpoint
///
/// `GET /counter/{id}`
///
/// Increments are applied asynchronously, so a redirect that just
/// completed may not be reflected yet.
pub async fn counter_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CounterResponse>, AppError> {
    let counter = state
        .shortening_service
        .get_counter(id)
        .await?
        .ok_or_else(|| AppError::not_found("url not found", json!({ "id": id })))?;

    Ok(Json(CounterResponse { counter }))
}
