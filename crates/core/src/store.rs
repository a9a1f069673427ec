//! Store contracts for users and expenses.
//!
//! The database crate implements these with SeaORM; tests use the in-memory
//! doubles in `testing`. Every expense operation except `insert` is
//! owner-scoped through its filter or its `owner` argument.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tally_shared::types::{ExpenseId, UserId};
use thiserror::Error;

use crate::expense::{Expense, ExpenseChanges, ExpenseFilter, NewExpense, SortOrder};

/// Failures reported by a store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backend failed (connection, query, decoding).
    #[error("store backend error: {0}")]
    Backend(String),
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Account identifier.
    pub id: UserId,
    /// Normalized email address.
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Normalized email address.
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
}

/// Persistence contract for users.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates an account. Fails with `Conflict` if the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Looks up an account by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Looks up an account by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Returns true if an account with this normalized email exists.
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}

/// Persistence contract for expenses.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Persists a new expense and returns the stored record.
    async fn insert(&self, expense: NewExpense) -> Result<Expense, StoreError>;

    /// Returns the records matching `filter`, sorted, after skipping `skip`
    /// and returning at most `limit`.
    async fn find(
        &self,
        filter: &ExpenseFilter,
        sort: SortOrder,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Expense>, StoreError>;

    /// Counts the records matching `filter`, ignoring pagination.
    async fn count(&self, filter: &ExpenseFilter) -> Result<u64, StoreError>;

    /// Applies `changes` to the expense `id` if it belongs to `owner`.
    /// Returns `None` when no such owned record exists.
    async fn update_owned(
        &self,
        id: ExpenseId,
        owner: UserId,
        changes: ExpenseChanges,
    ) -> Result<Option<Expense>, StoreError>;

    /// Deletes the expense `id` if it belongs to `owner`.
    /// Returns false when no such owned record exists.
    async fn delete_owned(&self, id: ExpenseId, owner: UserId) -> Result<bool, StoreError>;
}
