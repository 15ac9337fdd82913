//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Store reachable and counter queue open
/// - **503 Service Unavailable**: Store unreachable or counter queue closed
///
/// The cache is reported but never makes the service unhealthy: lookups
/// fall back to the store whenever it fails.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" },
///     "counter_queue": { "status": "ok", "message": "Available capacity: 100" },
///     "cache": { "status": "ok", "message": "Cache backend: redis" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;

    let queue_check = check_counter_queue(&state);

    let cache_check = check_cache(&state).await;

    let all_healthy = db_check.is_ok() && queue_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            counter_queue: queue_check,
            cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.store.ping().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    }
}

fn check_counter_queue(state: &AppState) -> CheckStatus {
    if state.counter.is_closed() {
        CheckStatus::error("Counter queue is closed")
    } else {
        CheckStatus::ok(format!(
            "Available capacity: {}",
            state.counter.available_capacity()
        ))
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    let name = state.cache.name();

    if state.cache.health_check().await {
        CheckStatus::ok(format!("Cache backend: {}", name))
    } else {
        CheckStatus::error(format!("Cache backend {} unreachable, serving from the store", name))
    }
}
