mod common;

use axum::http::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn test_health_endpoint_success() {
    let app = common::spawn_app();

    let response = app.server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["counter_queue"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["message"], "Cache backend: memory");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let app = common::spawn_app_without_cache();

    let response = app.server.get("/health").await;

    let json = response.json::<Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("database").is_some());
    assert!(json["checks"].get("counter_queue").is_some());
    assert!(json["checks"].get("cache").is_some());
    assert_eq!(json["checks"]["cache"]["message"], "Cache backend: disabled");
}

#[tokio::test]
async fn test_health_degraded_after_pipeline_shutdown() {
    let common::TestApp {
        server,
        pipeline,
        ..
    } = common::spawn_app();

    pipeline.shutdown().await;

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["counter_queue"]["status"], "error");
}
