//! Listing query construction.
//!
//! Turns the caller's identity and raw listing parameters into an
//! owner-scoped filter, a sort order and a page window. Range resolution
//! happens here so a malformed custom period fails before any store call.

use chrono::{DateTime, Utc};
use tally_shared::types::{PageRequest, UserId};

use super::category::Category;
use super::model::Expense;
use super::period::{DateRange, InvalidRangeError, PeriodParams};

/// Listing parameters after syntactic parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListExpensesQuery {
    /// Period token and custom bounds.
    pub period: PeriodParams,
    /// Category to restrict to.
    pub category: Option<Category>,
    /// Page window.
    pub page: PageRequest,
}

/// Storage filter. Always scoped to one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// Only records owned by this user.
    pub owner: UserId,
    /// Inclusive date bounds, if any.
    pub date_range: Option<DateRange>,
    /// Only records in this category, if any.
    pub category: Option<Category>,
}

impl ExpenseFilter {
    /// Filter matching every record of `owner`.
    #[must_use]
    pub const fn owned_by(owner: UserId) -> Self {
        Self {
            owner,
            date_range: None,
            category: None,
        }
    }

    /// Returns true if `expense` satisfies every clause.
    #[must_use]
    pub fn matches(&self, expense: &Expense) -> bool {
        expense.user_id == self.owner
            && self.date_range.is_none_or(|range| range.contains(expense.date))
            && self.category.is_none_or(|category| expense.category == category)
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest effective date first.
    #[default]
    DateDesc,
}

/// A complete listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseQuery {
    /// Storage filter.
    pub filter: ExpenseFilter,
    /// Ordering.
    pub sort: SortOrder,
    /// Page window.
    pub page: PageRequest,
}

impl ExpenseQuery {
    /// Builds the query for `owner`, resolving named periods against the clock.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error for a malformed custom period.
    pub fn build(owner: UserId, params: &ListExpensesQuery) -> Result<Self, InvalidRangeError> {
        Self::build_at(owner, params, Utc::now())
    }

    /// Builds the query with `now` as the end of named periods.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error for a malformed custom period.
    pub fn build_at(
        owner: UserId,
        params: &ListExpensesQuery,
        now: DateTime<Utc>,
    ) -> Result<Self, InvalidRangeError> {
        let date_range = params.period.resolve_at(now)?;

        Ok(Self {
            filter: ExpenseFilter {
                owner,
                date_range,
                category: params.category,
            },
            sort: SortOrder::DateDesc,
            page: params.page,
        })
    }

    /// Records to skip.
    #[must_use]
    pub const fn skip(&self) -> u64 {
        self.page.offset()
    }

    /// Maximum records to return.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.page.limit()
    }
}
