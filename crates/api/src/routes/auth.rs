//! Authentication routes for register and login.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde::Deserialize;
use tracing::info;
use validator::{Validate, ValidationError};

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::ValidJson;
use tally_core::auth::{MIN_PASSWORD_LEN, hash_password, normalize_email, verify_password};
use tally_core::store::{NewUser, User};
use tally_shared::AppError;
use tally_shared::auth::{AuthResponse, UserInfo};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Request body for registration.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address; normalized before storage.
    #[serde(default)]
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    /// Plain-text password.
    #[serde(default)]
    #[validate(custom(function = "validate_new_password"))]
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address; normalized before lookup.
    #[serde(default)]
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    /// Plain-text password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(ValidationError::new("password").with_message(
            format!("Password must be at least {MIN_PASSWORD_LEN} characters long").into(),
        ))
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid email or password".to_string())
}

fn auth_response(state: &AppState, message: &str, user: User) -> ApiResult<AuthResponse> {
    let token = state
        .jwt_service
        .generate_token(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        message: message.to_string(),
        token,
        expires_in: state.jwt_service.expires_in(),
        user: UserInfo {
            id: user.id,
            email: user.email,
        },
    })
}

/// POST /auth/register - Create an account and return a token.
async fn register(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = normalize_email(&payload.email);

    if state.users.email_exists(&email).await? {
        info!(email = %email, "Registration attempt for existing email");
        return Err(AppError::Conflict("User already exists with this email".to_string()).into());
    }

    let password_hash =
        hash_password(&payload.password).map_err(|e| AppError::Internal(e.to_string()))?;

    let user = state
        .users
        .create(NewUser {
            email,
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, "User registered");

    let response = auth_response(&state, "User registered successfully", user)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /auth/login - Authenticate and return a token.
async fn login(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = normalize_email(&payload.email);

    let Some(user) = state.users.find_by_email(&email).await? else {
        info!(email = %email, "Login attempt for non-existent user");
        return Err(invalid_credentials().into());
    };

    let valid = verify_password(&payload.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !valid {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(invalid_credentials().into());
    }

    info!(user_id = %user.id, "User logged in");

    let response = auth_response(&state, "Login successful", user)?;
    Ok((StatusCode::OK, Json(response)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(password: &str) -> RegisterRequest {
        RegisterRequest {
            email: "ana@example.com".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_password_length_boundary() {
        assert!(register(&"x".repeat(MIN_PASSWORD_LEN)).validate().is_ok());

        let errors = register(&"x".repeat(MIN_PASSWORD_LEN - 1))
            .validate()
            .unwrap_err();
        let fields = crate::extractors::field_errors(&errors);
        assert_eq!(fields.0[0].field, "password");
        assert_eq!(
            fields.0[0].message,
            "Password must be at least 6 characters long"
        );
    }
}
