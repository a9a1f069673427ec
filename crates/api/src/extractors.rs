//! Request extractors.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tally_shared::{FieldError, FieldErrors};
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// JSON body that has been deserialized and validated.
///
/// A body that is not valid JSON, or does not fit `T`, is rejected as a
/// validation error on the field `body`.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| FieldErrors::single("body", rejection.body_text()))?;

        value.validate().map_err(|errors| field_errors(&errors))?;

        Ok(Self(value))
    }
}

/// Query string deserialized into `T`.
///
/// A query string that does not fit `T` (for example a repeated single-valued
/// parameter) is rejected as a validation error on the field `query`.
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| FieldErrors::single("query", rejection.body_text()))?;

        Ok(Self(value))
    }
}

/// Flattens `validator` output into field errors, ordered by field name.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let list = fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                FieldError::new(field.to_string(), message)
            })
        })
        .collect();

    FieldErrors(list)
}
