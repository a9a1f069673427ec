//! Unauthenticated service endpoints.

mod common;

use axum::http::StatusCode;
use common::TestApp;

#[tokio::test]
async fn test_health_reports_ok() {
    let app = TestApp::new();

    let (status, body) = app.send("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "Tally API is running");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_debug_routes_lists_expense_routes() {
    let app = TestApp::new();

    let (status, body) = app.send("GET", "/debug/routes", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let routes: Vec<_> = body["routes"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r.as_str())
        .collect();
    assert!(routes.contains(&"GET /expenses"));
    assert!(routes.contains(&"DELETE /expenses/{id}"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app.send("GET", "/nope", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "Not Found - /nope");
}

#[tokio::test]
async fn test_cors_preflight_is_allowed() {
    let app = TestApp::new();

    let request = axum::http::Request::builder()
        .method("OPTIONS")
        .uri("/expenses")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}
