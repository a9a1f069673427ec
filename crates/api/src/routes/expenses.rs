//! Expense routes. Every handler is scoped to the authenticated caller.

use std::borrow::Cow;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use validator::{Validate, ValidationError};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{QueryParams, ValidJson};
use crate::{AppState, middleware::AuthUser};
use tally_core::expense::validation::{
    AMOUNT_MESSAGE, DATE_MESSAGE, DESCRIPTION_MESSAGE, category_message, is_valid_amount,
    is_valid_description,
};
use tally_core::expense::{
    Category, CreateExpense, Expense, ExpensePatch, ListExpensesQuery, PeriodParams,
    parse_date_time,
};
use tally_shared::types::{ExpenseId, PageMeta, PageRequest, UserId};
use tally_shared::{AppError, FieldError, FieldErrors};

/// Creates the expense routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/{id}", put(update_expense).delete(delete_expense))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating an expense.
///
/// Fields arrive as raw JSON so that a value of the wrong type is reported
/// against its own field rather than as an unreadable body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExpenseRequest {
    /// Non-negative amount, as a number or numeric string.
    #[validate(
        required(message = "Amount must be a positive number"),
        custom(function = "validate_amount")
    )]
    pub amount: Option<Value>,
    /// Category label.
    #[validate(
        required(
            message = "Category must be one of: Groceries, Leisure, Electronics, Utilities, Clothing, Health, Others"
        ),
        custom(function = "validate_category")
    )]
    pub category: Option<Value>,
    /// Description, 1 to 500 characters after trimming.
    #[validate(
        required(message = "Description must be between 1 and 500 characters"),
        custom(function = "validate_description")
    )]
    pub description: Option<Value>,
    /// ISO 8601 date; defaults to now.
    #[validate(custom(function = "validate_date"))]
    pub date: Option<Value>,
}

/// Request body for a partial update. Absent or `null` fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateExpenseRequest {
    /// New amount.
    #[validate(custom(function = "validate_amount"))]
    pub amount: Option<Value>,
    /// New category label.
    #[validate(custom(function = "validate_category"))]
    pub category: Option<Value>,
    /// New description.
    #[validate(custom(function = "validate_description"))]
    pub description: Option<Value>,
    /// New ISO 8601 date.
    #[validate(custom(function = "validate_date"))]
    pub date: Option<Value>,
}

/// Query string for listing expenses. Values arrive raw and are
/// interpreted leniently.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListExpensesParams {
    /// Page number.
    pub page: Option<String>,
    /// Page size.
    pub limit: Option<String>,
    /// `week`, `month`, `3months` or `custom`.
    pub period: Option<String>,
    /// Start bound for `custom`.
    pub start_date: Option<String>,
    /// End bound for `custom`.
    pub end_date: Option<String>,
    /// Category label.
    pub category: Option<String>,
}

/// An expense as returned to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    /// Expense ID.
    pub id: ExpenseId,
    /// Amount as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Category label.
    pub category: Category,
    /// Description.
    pub description: String,
    /// Effective date (RFC 3339).
    pub date: DateTime<Utc>,
    /// Owner ID.
    pub user_id: UserId,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            amount: expense.amount,
            category: expense.category,
            description: expense.description,
            date: expense.date,
            user_id: expense.user_id,
        }
    }
}

/// Response for a listing.
#[derive(Debug, Serialize)]
pub struct ExpenseListResponse {
    /// The requested page.
    pub expenses: Vec<ExpenseResponse>,
    /// Page metadata.
    pub pagination: PageMeta,
}

// ============================================================================
// Validation Rules
// ============================================================================

fn rejected(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn check<T>(code: &'static str, parsed: Result<T, FieldError>) -> Result<(), ValidationError> {
    parsed.map(drop).map_err(|e| rejected(code, e.message))
}

fn validate_amount(amount: &Value) -> Result<(), ValidationError> {
    check("amount", parse_amount(amount))
}

fn validate_category(category: &Value) -> Result<(), ValidationError> {
    check("category", parse_category(category))
}

fn validate_description(description: &Value) -> Result<(), ValidationError> {
    check("description", parse_description(description))
}

fn validate_date(date: &Value) -> Result<(), ValidationError> {
    check("date", parse_date(date))
}

/// Accepts a JSON number or a numeric string.
fn parse_amount(raw: &Value) -> Result<Decimal, FieldError> {
    let amount = match raw {
        Value::Number(_) | Value::String(_) => <Decimal as Deserialize>::deserialize(raw).ok(),
        _ => None,
    };
    amount
        .filter(|a| is_valid_amount(*a))
        .ok_or_else(|| FieldError::new("amount", AMOUNT_MESSAGE))
}

fn parse_category_label(raw: &str) -> Result<Category, FieldError> {
    raw.parse()
        .map_err(|_| FieldError::new("category", category_message()))
}

fn parse_category(raw: &Value) -> Result<Category, FieldError> {
    raw.as_str()
        .map_or_else(|| Err(FieldError::new("category", category_message())), parse_category_label)
}

fn parse_description(raw: &Value) -> Result<String, FieldError> {
    raw.as_str()
        .filter(|d| is_valid_description(d))
        .map(ToString::to_string)
        .ok_or_else(|| FieldError::new("description", DESCRIPTION_MESSAGE))
}

fn parse_date(raw: &Value) -> Result<DateTime<Utc>, FieldError> {
    raw.as_str()
        .and_then(parse_date_time)
        .ok_or_else(|| FieldError::new("date", DATE_MESSAGE))
}

/// Parses a required field, recording a failure instead of returning early.
fn required<T>(
    raw: Option<&Value>,
    parse: fn(&Value) -> Result<T, FieldError>,
    missing: impl FnOnce() -> FieldError,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match raw.map_or_else(|| Err(missing()), parse) {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

impl CreateExpenseRequest {
    /// Converts a validated request into the domain input.
    fn into_domain(self) -> Result<CreateExpense, FieldErrors> {
        let mut errors = Vec::new();

        let amount = required(
            self.amount.as_ref(),
            parse_amount,
            || FieldError::new("amount", AMOUNT_MESSAGE),
            &mut errors,
        );
        let category = required(
            self.category.as_ref(),
            parse_category,
            || FieldError::new("category", category_message()),
            &mut errors,
        );
        let description = required(
            self.description.as_ref(),
            parse_description,
            || FieldError::new("description", DESCRIPTION_MESSAGE),
            &mut errors,
        );
        let date = match self.date.as_ref().map(parse_date).transpose() {
            Ok(date) => date,
            Err(e) => {
                errors.push(e);
                None
            }
        };

        match (amount, category, description) {
            (Some(amount), Some(category), Some(description)) if errors.is_empty() => {
                Ok(CreateExpense {
                    amount,
                    category,
                    description,
                    date,
                })
            }
            _ => Err(FieldErrors(errors)),
        }
    }
}

impl UpdateExpenseRequest {
    /// Converts a validated request into a patch.
    fn into_domain(self) -> Result<ExpensePatch, FieldErrors> {
        fn optional<T>(
            raw: Option<&Value>,
            parse: fn(&Value) -> Result<T, FieldError>,
        ) -> Result<Option<T>, FieldErrors> {
            raw.map(parse).transpose().map_err(|e| FieldErrors(vec![e]))
        }

        Ok(ExpensePatch {
            amount: optional(self.amount.as_ref(), parse_amount)?,
            category: optional(self.category.as_ref(), parse_category)?,
            description: optional(self.description.as_ref(), parse_description)?,
            date: optional(self.date.as_ref(), parse_date)?,
        })
    }
}

impl ListExpensesParams {
    /// Interprets the raw query string.
    ///
    /// # Errors
    ///
    /// Returns a field error if `category` names no category.
    pub fn into_query(self) -> Result<ListExpensesQuery, FieldErrors> {
        let category = self
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(parse_category_label)
            .transpose()
            .map_err(|e| FieldErrors(vec![e]))?;

        Ok(ListExpensesQuery {
            period: PeriodParams {
                period: self.period,
                start_date: self.start_date,
                end_date: self.end_date,
            },
            category,
            page: PageRequest::from_raw(self.page.as_deref(), self.limit.as_deref()),
        })
    }
}

/// Parses a path id. An id that is not a UUID cannot name any expense.
fn parse_expense_id(raw: &str) -> Result<ExpenseId, ApiError> {
    raw.parse()
        .map_err(|_| AppError::NotFound("Expense not found".to_string()).into())
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/expenses` - Record an expense for the caller.
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(payload): ValidJson<CreateExpenseRequest>,
) -> ApiResult<impl IntoResponse> {
    let request = payload.into_domain()?;
    let expense = state.expenses.create(auth.user_id(), request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Expense created successfully",
            "expense": ExpenseResponse::from(expense),
        })),
    ))
}

/// GET `/expenses` - List the caller's expenses, newest first.
async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(params): QueryParams<ListExpensesParams>,
) -> ApiResult<impl IntoResponse> {
    let query = params.into_query()?;
    let page = state.expenses.list(auth.user_id(), &query).await?;

    Ok(Json(ExpenseListResponse {
        expenses: page.items.into_iter().map(ExpenseResponse::from).collect(),
        pagination: page.pagination,
    }))
}

/// PUT `/expenses/{id}` - Partially update one of the caller's expenses.
async fn update_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<UpdateExpenseRequest>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_expense_id(&id)?;
    let patch = payload.into_domain()?;
    let expense = state.expenses.update(auth.user_id(), id, patch).await?;

    Ok(Json(json!({
        "message": "Expense updated successfully",
        "expense": ExpenseResponse::from(expense),
    })))
}

/// DELETE `/expenses/{id}` - Delete one of the caller's expenses.
async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_expense_id(&id)?;
    state.expenses.delete(auth.user_id(), id).await?;

    Ok(Json(json!({ "message": "Expense deleted successfully" })))
}
