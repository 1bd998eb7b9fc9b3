//! Tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, body_string, get};

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool);

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[tokio::test]
async fn home_links_every_resource() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool);

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    for link in [r#"href="/Books""#, r#"href="/News""#, r#"href="/Notes""#] {
        assert!(html.contains(link), "missing {link}");
    }
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool);

    let response = get(&app, "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool);

    let response = get(&app, "/health").await;
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}
