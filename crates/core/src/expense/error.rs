//! Expense error types.

use tally_shared::AppError;
use tally_shared::types::ExpenseId;
use thiserror::Error;

use super::period::InvalidRangeError;
use crate::store::StoreError;

/// Expense-related errors.
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// The custom period could not be resolved.
    #[error(transparent)]
    InvalidRange(#[from] InvalidRangeError),

    /// No expense with this id is owned by the caller.
    #[error("Expense not found: {0}")]
    NotFound(ExpenseId),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ExpenseError> for AppError {
    fn from(err: ExpenseError) -> Self {
        match err {
            ExpenseError::InvalidRange(e) => Self::InvalidRange(e.to_string()),
            ExpenseError::NotFound(_) => Self::NotFound("Expense not found".to_string()),
            ExpenseError::Store(StoreError::Conflict(msg)) => Self::Conflict(msg),
            ExpenseError::Store(StoreError::Backend(msg)) => Self::Database(msg),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => Self::Conflict(msg),
            StoreError::Backend(msg) => Self::Database(msg),
        }
    }
}
