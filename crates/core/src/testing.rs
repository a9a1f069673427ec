//! In-memory store doubles.
//!
//! Enabled for this crate's tests and, through the `testing` feature, for
//! downstream test suites that need a running service without PostgreSQL.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use tally_shared::types::{ExpenseId, UserId};

use crate::expense::{Expense, ExpenseChanges, ExpenseFilter, NewExpense, SortOrder};
use crate::store::{ExpenseStore, NewUser, StoreError, User, UserStore};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
}

/// Expense store backed by a vector.
#[derive(Debug, Default)]
pub struct InMemoryExpenseStore {
    rows: Mutex<Vec<Expense>>,
    failing: AtomicBool,
    calls: Mutex<Vec<&'static str>>,
}

impl InMemoryExpenseStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a backend error.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Names of the store methods called so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Snapshot of every stored record.
    #[must_use]
    pub fn all(&self) -> Vec<Expense> {
        self.rows.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn enter(&self, name: &'static str) -> Result<(), StoreError> {
        lock(&self.calls)?.push(name);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ExpenseStore for InMemoryExpenseStore {
    async fn insert(&self, expense: NewExpense) -> Result<Expense, StoreError> {
        self.enter("insert")?;
        let now = Utc::now();
        let stored = Expense {
            id: ExpenseId::new(),
            user_id: expense.owner,
            amount: expense.amount,
            category: expense.category,
            description: expense.description,
            date: expense.date,
            created_at: now,
            updated_at: now,
        };
        lock(&self.rows)?.push(stored.clone());
        Ok(stored)
    }

    async fn find(
        &self,
        filter: &ExpenseFilter,
        sort: SortOrder,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Expense>, StoreError> {
        self.enter("find")?;
        let mut matched: Vec<Expense> = lock(&self.rows)?
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();

        match sort {
            SortOrder::DateDesc => {
                matched.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
            }
        }

        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(matched.into_iter().skip(skip).take(limit).collect())
    }

    async fn count(&self, filter: &ExpenseFilter) -> Result<u64, StoreError> {
        self.enter("count")?;
        let count = lock(&self.rows)?.iter().filter(|e| filter.matches(e)).count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn update_owned(
        &self,
        id: ExpenseId,
        owner: UserId,
        changes: ExpenseChanges,
    ) -> Result<Option<Expense>, StoreError> {
        self.enter("update_owned")?;
        let mut rows = lock(&self.rows)?;
        let Some(expense) = rows.iter_mut().find(|e| e.id == id && e.user_id == owner) else {
            return Ok(None);
        };
        changes.apply(expense, Utc::now());
        Ok(Some(expense.clone()))
    }

    async fn delete_owned(&self, id: ExpenseId, owner: UserId) -> Result<bool, StoreError> {
        self.enter("delete_owned")?;
        let mut rows = lock(&self.rows)?;
        let before = rows.len();
        rows.retain(|e| !(e.id == id && e.user_id == owner));
        Ok(rows.len() != before)
    }
}

/// User store backed by a map keyed on normalized email.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes an account, as if it had been deleted out of band.
    pub fn remove(&self, id: UserId) {
        if let Ok(mut users) = self.users.lock() {
            users.retain(|_, user| user.id != id);
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = lock(&self.users)?;
        if users.contains_key(&user.email) {
            return Err(StoreError::Conflict("Email already registered".to_string()));
        }
        let now = Utc::now();
        let created = User {
            id: UserId::new(),
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(created.email.clone(), created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(lock(&self.users)?.get(email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(lock(&self.users)?.values().find(|u| u.id == id).cloned())
    }
}
