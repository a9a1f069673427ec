//! Error-to-response mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tally_core::expense::ExpenseError;
use tally_core::store::StoreError;
use tally_shared::{AppError, FieldErrors};

/// Handler error carrying an [`AppError`].
///
/// Server-side failures are logged with their detail and reported to the
/// client as a bare "Server error".
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ExpenseError> for ApiError {
    fn from(err: ExpenseError) -> Self {
        Self(err.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err.into())
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self(AppError::Validation(errors))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let error = self.0.error_code().to_ascii_lowercase();

        let body = match self.0 {
            AppError::Validation(errors) => json!({
                "error": error,
                "message": "Validation errors",
                "errors": errors,
            }),
            AppError::Database(detail) | AppError::Internal(detail) => {
                tracing::error!(error = %detail, code = %error, "Request failed");
                json!({ "error": error, "message": "Server error" })
            }
            AppError::Unauthorized(message)
            | AppError::NotFound(message)
            | AppError::InvalidRange(message)
            | AppError::Conflict(message) => json!({ "error": error, "message": message }),
        };

        (status, Json(body)).into_response()
    }
}
