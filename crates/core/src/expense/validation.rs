//! Field rules for expense requests.
//!
//! The HTTP layer wires these into its request validation so that the same
//! messages come back whichever path rejected the input.

use rust_decimal::Decimal;

use super::category::Category;

/// Longest allowed description, in characters, after trimming.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Message for a missing or negative amount.
pub const AMOUNT_MESSAGE: &str = "Amount must be a positive number";

/// Message for a description outside 1..=500 characters.
pub const DESCRIPTION_MESSAGE: &str = "Description must be between 1 and 500 characters";

/// Message for an unparseable date.
pub const DATE_MESSAGE: &str = "Date must be a valid ISO 8601 date";

/// Message for a category outside the closed set.
#[must_use]
pub fn category_message() -> String {
    format!("Category must be one of: {}", Category::labels())
}

/// Amounts are non-negative; zero is accepted.
#[must_use]
pub fn is_valid_amount(amount: Decimal) -> bool {
    !amount.is_sign_negative() || amount.is_zero()
}

/// Descriptions hold 1 to 500 characters once trimmed.
#[must_use]
pub fn is_valid_description(description: &str) -> bool {
    let len = description.trim().chars().count();
    (1..=MAX_DESCRIPTION_LEN).contains(&len)
}
