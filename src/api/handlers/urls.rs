//! Handlers for creating, reading and deleting short URLs.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::url::{CreateUrlRequest, UrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /api`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "www.google.com",
///   "code": "abcd1234"   // optional
/// }
/// ```
///
/// # Response
///
/// **201 Created** with `Location` set to the short URL:
///
/// ```json
/// {
///   "id": 1,
///   "code": "abcd1234",
///   "url": "http://www.google.com",
///   "shortUrl": "http://localhost/abcd1234",
///   "domain": "http://localhost",
///   "counter": 0
/// }
/// ```
///
/// Submitting a URL that was already shortened returns the existing record.
///
/// # Errors
///
/// - **400 Bad Request**: invalid URL or malformed code
/// - **409 Conflict**: the requested code is taken
/// - **500 Internal Server Error**: store failure
pub async fn create_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let record = state.shortening_service.create(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, record.short_url.clone())],
        Json(UrlResponse::from(record)),
    ))
}

/// Returns a stored record by id.
///
/// # Endpoint
///
/// `GET /api/{id}`
pub async fn get_url_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UrlResponse>, AppError> {
    let record = state
        .shortening_service
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("url not found", json!({ "id": id })))?;

    Ok(Json(UrlResponse::from(record)))
}

/// Deletes a record by id. Deleting an unknown id still returns 204.
///
/// # Endpoint
///
/// `DELETE /api/{id}`
pub async fn delete_url_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.shortening_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
