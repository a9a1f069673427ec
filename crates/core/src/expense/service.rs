//! Expense service: create, list, update and delete for one owner.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tally_shared::types::{ExpenseId, PageResponse, UpdatePolicy, UserId};

use super::error::ExpenseError;
use super::model::{CreateExpense, Expense, ExpensePatch, NewExpense};
use super::query::{ExpenseQuery, ListExpensesQuery};
use crate::store::ExpenseStore;

/// Orchestrates expense operations over an [`ExpenseStore`].
#[derive(Clone)]
pub struct ExpenseService {
    store: Arc<dyn ExpenseStore>,
    update_policy: UpdatePolicy,
}

impl std::fmt::Debug for ExpenseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseService")
            .field("update_policy", &self.update_policy)
            .finish_non_exhaustive()
    }
}

impl ExpenseService {
    /// Creates a service with the given store and partial-update policy.
    #[must_use]
    pub fn new(store: Arc<dyn ExpenseStore>, update_policy: UpdatePolicy) -> Self {
        Self {
            store,
            update_policy,
        }
    }

    /// Records a new expense for `owner`. The date defaults to now.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::Store` if persisting fails.
    pub async fn create(
        &self,
        owner: UserId,
        request: CreateExpense,
    ) -> Result<Expense, ExpenseError> {
        let expense = NewExpense::from_request(owner, request, Utc::now());
        let created = self.store.insert(expense).await?;

        tracing::info!(user_id = %owner, expense_id = %created.id, "Expense created");
        Ok(created)
    }

    /// Lists `owner`'s expenses, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::InvalidRange` for a malformed custom period,
    /// in which case the store is never queried.
    pub async fn list(
        &self,
        owner: UserId,
        params: &ListExpensesQuery,
    ) -> Result<PageResponse<Expense>, ExpenseError> {
        self.list_at(owner, params, Utc::now()).await
    }

    /// Lists with `now` as the end of named periods.
    ///
    /// # Errors
    ///
    /// See [`Self::list`].
    pub async fn list_at(
        &self,
        owner: UserId,
        params: &ListExpensesQuery,
        now: DateTime<Utc>,
    ) -> Result<PageResponse<Expense>, ExpenseError> {
        let query = ExpenseQuery::build_at(owner, params, now)?;

        let items = self
            .store
            .find(&query.filter, query.sort, query.skip(), query.limit())
            .await?;
        let total = self.store.count(&query.filter).await?;

        tracing::debug!(user_id = %owner, total, returned = items.len(), "Expenses listed");
        Ok(PageResponse::new(items, query.page, total))
    }

    /// Applies a partial update to an expense owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::NotFound` if the expense does not exist or
    /// belongs to someone else.
    pub async fn update(
        &self,
        owner: UserId,
        id: ExpenseId,
        patch: ExpensePatch,
    ) -> Result<Expense, ExpenseError> {
        let changes = patch.resolve(self.update_policy);

        let updated = self
            .store
            .update_owned(id, owner, changes)
            .await?
            .ok_or(ExpenseError::NotFound(id))?;

        tracing::info!(user_id = %owner, expense_id = %id, "Expense updated");
        Ok(updated)
    }

    /// Deletes an expense owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::NotFound` if the expense does not exist or
    /// belongs to someone else.
    pub async fn delete(&self, owner: UserId, id: ExpenseId) -> Result<(), ExpenseError> {
        if !self.store.delete_owned(id, owner).await? {
            return Err(ExpenseError::NotFound(id));
        }

        tracing::info!(user_id = %owner, expense_id = %id, "Expense deleted");
        Ok(())
    }
}
