//! Health check endpoints.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Human-readable status line.
    pub message: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Route listing response.
#[derive(Serialize)]
pub struct RoutesResponse {
    /// Summary line.
    pub message: &'static str,
    /// Every mounted route as `METHOD /path`.
    pub routes: &'static [&'static str],
}

/// Every route the API serves.
pub const ROUTES: &[&str] = &[
    "GET /health",
    "GET /debug/routes",
    "POST /auth/register",
    "POST /auth/login",
    "GET /expenses",
    "POST /expenses",
    "PUT /expenses/{id}",
    "DELETE /expenses/{id}",
];

/// Health check handler.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "Tally API is running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Lists the mounted routes.
async fn list_routes() -> Json<RoutesResponse> {
    Json(RoutesResponse {
        message: "Routes loaded",
        routes: ROUTES,
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/debug/routes", get(list_routes))
}
