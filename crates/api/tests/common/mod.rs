//! Shared harness: the real router over in-memory stores.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tally_api::{AppState, create_router};
use tally_core::expense::ExpenseService;
use tally_core::testing::{InMemoryExpenseStore, InMemoryUserStore};
use tally_shared::types::UpdatePolicy;
use tally_shared::{JwtConfig, JwtService};
use tower::ServiceExt;

/// Router plus handles on its stores.
pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserStore>,
    pub expenses: Arc<InMemoryExpenseStore>,
    pub jwt: Arc<JwtService>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_policy(UpdatePolicy::Presence)
    }

    pub fn with_policy(policy: UpdatePolicy) -> Self {
        let users = Arc::new(InMemoryUserStore::new());
        let expenses = Arc::new(InMemoryExpenseStore::new());
        let jwt = Arc::new(JwtService::new(JwtConfig {
            secret: "integration-test-secret".to_string(),
            expires_in_secs: 3600,
        }));

        let state = AppState {
            users: users.clone(),
            expenses: ExpenseService::new(expenses.clone(), policy),
            jwt_service: jwt.clone(),
        };

        Self {
            router: create_router(state),
            users,
            expenses,
            jwt,
        }
    }

    /// Sends a request and returns the status and parsed JSON body
    /// (`Value::Null` for an empty or non-JSON body).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// Sends a raw body with a JSON content type.
    pub async fn send_raw(&self, method: &str, uri: &str, token: &str, raw: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw.to_string()))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    /// Registers an account and returns its token.
    pub async fn register(&self, email: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/auth/register",
                None,
                Some(json!({ "email": email, "password": "secret123" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Creates an expense and returns the shaped record.
    pub async fn create_expense(&self, token: &str, body: Value) -> Value {
        let (status, response) = self.send("POST", "/expenses", Some(token), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {response}");
        response["expense"].clone()
    }
}
