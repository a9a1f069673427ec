//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication middleware
//! - Request extractors
//! - Error-to-response mapping

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::{Json, Router, http::StatusCode, http::Uri, response::IntoResponse};
use serde_json::json;
use tally_core::expense::ExpenseService;
use tally_core::store::UserStore;
use tally_shared::JwtService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account storage.
    pub users: Arc<dyn UserStore>,
    /// Expense operations.
    pub expenses: ExpenseService,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
}

/// Response for requests that match no route.
async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": format!("Not Found - {}", uri.path())
        })),
    )
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes_with_state(state.clone()))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
