mod common;

use axum::http::{StatusCode, header};
use serde_json::{Value, json};
use shortening_service::api::dto::url::UrlResponse;

#[tokio::test]
async fn test_create_url_success() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api")
        .json(&json!({ "url": "www.google.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<UrlResponse>();
    assert_eq!(body.id, 1);
    assert_eq!(body.code.len(), 8);
    assert_eq!(body.url, "http://www.google.com");
    assert_eq!(body.short_url, format!("http://localhost/{}", body.code));
    assert_eq!(body.domain, "http://localhost");
    assert_eq!(body.counter, 0);

    let location = response.headers().get(header::LOCATION).unwrap();
    assert_eq!(location.to_str().unwrap(), body.short_url);
}

#[tokio::test]
async fn test_create_url_is_idempotent() {
    let app = common::spawn_app();

    let first = app
        .server
        .post("/api")
        .json(&json!({ "url": "www.google.com" }))
        .await
        .json::<UrlResponse>();

    let second = app
        .server
        .post("/api")
        .json(&json!({ "url": "http://www.google.com" }))
        .await;

    second.assert_status(StatusCode::CREATED);
    assert_eq!(second.json::<UrlResponse>(), first);
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_create_url_with_custom_code() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api")
        .json(&json!({ "url": "https://example.com/docs", "code": "Docs2024" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<UrlResponse>();
    assert_eq!(body.code, "Docs2024");
    assert_eq!(body.url, "https://example.com/docs");
    assert_eq!(body.short_url, "http://localhost/Docs2024");
}

#[tokio::test]
async fn test_create_url_duplicate_code_conflict() {
    let app = common::spawn_app();
    common::create_test_url(app.store.as_ref(), "abcd1234", "http://first.com").await;

    let response = app
        .server
        .post("/api")
        .json(&json!({ "url": "second.com", "code": "abcd1234" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "code_already_exists");
    assert_eq!(json["error"]["message"], "code already exists in the database");
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_create_url_invalid_code() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api")
        .json(&json!({ "url": "example.com", "code": "bad-code" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_create_url_invalid_url() {
    let app = common::spawn_app();

    for url in ["", "   ", "exa mple.com", "http://"] {
        let response = app.server.post("/api").json(&json!({ "url": url })).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_create_url_missing_field() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api")
        .json(&json!({ "code": "abcd1234" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_url_by_id() {
    let app = common::spawn_app();
    let id = common::create_test_url(app.store.as_ref(), "abcd1234", "http://example.com").await;

    let response = app.server.get(&format!("/api/{}", id)).await;

    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(
        body,
        json!({
            "id": id,
            "code": "abcd1234",
            "url": "http://example.com",
            "shortUrl": "http://localhost/abcd1234",
            "domain": "http://localhost",
            "counter": 0
        })
    );
}

#[tokio::test]
async fn test_get_url_not_found() {
    let app = common::spawn_app();

    let response = app.server.get("/api/42").await;

    response.assert_status_not_found();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_delete_url() {
    let app = common::spawn_app();
    let id = common::create_test_url(app.store.as_ref(), "abcd1234", "http://example.com").await;

    let response = app.server.delete(&format!("/api/{}", id)).await;
    response.assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&format!("/api/{}", id))
        .await
        .assert_status_not_found();

    // Deleting again is not an error
    app.server
        .delete(&format!("/api/{}", id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_counter_not_found() {
    let app = common::spawn_app();

    app.server.get("/counter/7").await.assert_status_not_found();
}

#[tokio::test]
async fn test_counter_starts_at_zero() {
    let app = common::spawn_app();
    let id = common::create_test_url(app.store.as_ref(), "abcd1234", "http://example.com").await;

    let response = app.server.get(&format!("/counter/{}", id)).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "counter": 0 }));
}
