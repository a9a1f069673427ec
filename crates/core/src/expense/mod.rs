//! Expense tracking.
//!
//! This module implements:
//! - The closed category set
//! - Date-range resolution for period filters
//! - Listing query construction (filter, sort, page window)
//! - Field validation rules shared with the HTTP layer
//! - The expense service over an `ExpenseStore`

pub mod category;
pub mod error;
pub mod model;
pub mod period;
pub mod query;
pub mod service;
pub mod validation;

#[cfg(test)]
mod query_props;

pub use category::{Category, UnknownCategory};
pub use error::ExpenseError;
pub use model::{CreateExpense, Expense, ExpenseChanges, ExpensePatch, NewExpense};
pub use period::{
    DateRange, InvalidRangeError, Period, PeriodParams, parse_date_time, resolve_date_range_at,
};
pub use query::{ExpenseFilter, ExpenseQuery, ListExpensesQuery, SortOrder};
pub use service::ExpenseService;
