mod common;

use axum::http::{StatusCode, header};
use serde_json::{Value, json};
use shortening_service::api::dto::url::UrlResponse;

#[tokio::test]
async fn test_redirect_success() {
    let app = common::spawn_app();
    common::create_test_url(app.store.as_ref(), "abcd1234", "https://example.com").await;

    let response = app.server.get("/abcd1234").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://example.com"
    );
}

#[tokio::test]
async fn test_redirect_not_found() {
    let app = common::spawn_app();

    let response = app.server.get("/zzzz9999").await;

    response.assert_status_not_found();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["details"]["code"], "zzzz9999");
}

#[tokio::test]
async fn test_redirects_are_counted() {
    let common::TestApp {
        server,
        pipeline,
        ..
    } = common::spawn_app();

    let created = server
        .post("/api")
        .json(&json!({ "url": "www.google.com" }))
        .await
        .json::<UrlResponse>();

    for _ in 0..3 {
        server
            .get(&format!("/{}", created.code))
            .await
            .assert_status(StatusCode::FOUND);
    }

    // Drain the counter queue before reading the counter.
    pipeline.shutdown().await;

    let response = server.get(&format!("/counter/{}", created.id)).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "counter": 3 }));

    let record = server
        .get(&format!("/api/{}", created.id))
        .await
        .json::<UrlResponse>();
    assert_eq!(record.counter, 3);
}

#[tokio::test]
async fn test_redirect_without_cache() {
    let app = common::spawn_app_without_cache();
    common::create_test_url(app.store.as_ref(), "abcd1234", "http://example.com").await;

    for _ in 0..2 {
        let response = app.server.get("/abcd1234").await;
        response.assert_status(StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "http://example.com"
        );
    }
}
