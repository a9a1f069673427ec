//! Expense repository: the PostgreSQL-backed [`ExpenseStore`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use tally_core::expense::{Expense, ExpenseChanges, ExpenseFilter, NewExpense, SortOrder};
use tally_core::store::{ExpenseStore, StoreError};
use tally_shared::types::pagination::MAX_PAGE_VALUE;
use tally_shared::types::{ExpenseId, UserId};

use super::store_error;
use crate::entities::expenses;
use crate::entities::sea_orm_active_enums::ExpenseCategory;

/// Expense repository for owner-scoped CRUD.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: Arc<DatabaseConnection>,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Builds the `WHERE` clause for a listing filter.
    #[must_use]
    pub fn condition(filter: &ExpenseFilter) -> Condition {
        let mut condition =
            Condition::all().add(expenses::Column::UserId.eq(filter.owner.into_inner()));

        if let Some(range) = filter.date_range {
            condition = condition.add(expenses::Column::Date.between(range.start, range.end));
        }

        if let Some(category) = filter.category {
            condition =
                condition.add(expenses::Column::Category.eq(ExpenseCategory::from(category)));
        }

        condition
    }

    /// Builds the paged, sorted listing query.
    ///
    /// `skip` and `limit` are capped at [`MAX_PAGE_VALUE`] so they always bind as `BIGINT`.
    #[must_use]
    pub fn find_query(
        filter: &ExpenseFilter,
        sort: SortOrder,
        skip: u64,
        limit: u64,
    ) -> Select<expenses::Entity> {
        let query = expenses::Entity::find().filter(Self::condition(filter));

        let query = match sort {
            SortOrder::DateDesc => query
                .order_by_desc(expenses::Column::Date)
                .order_by_desc(expenses::Column::Id),
        };

        query
            .offset(skip.min(MAX_PAGE_VALUE))
            .limit(limit.min(MAX_PAGE_VALUE))
    }

    fn owned(id: ExpenseId, owner: UserId) -> Condition {
        Condition::all()
            .add(expenses::Column::Id.eq(id.into_inner()))
            .add(expenses::Column::UserId.eq(owner.into_inner()))
    }
}

/// Converts a row into the domain record.
#[must_use]
pub fn to_domain(model: expenses::Model) -> Expense {
    Expense {
        id: ExpenseId::from_uuid(model.id),
        user_id: UserId::from_uuid(model.user_id),
        amount: model.amount,
        category: model.category.into(),
        description: model.description,
        date: model.date.with_timezone(&Utc),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

#[async_trait]
impl ExpenseStore for ExpenseRepository {
    async fn insert(&self, expense: NewExpense) -> Result<Expense, StoreError> {
        let now = Utc::now().into();
        let model = expenses::ActiveModel {
            id: Set(ExpenseId::new().into_inner()),
            user_id: Set(expense.owner.into_inner()),
            amount: Set(expense.amount),
            category: Set(expense.category.into()),
            description: Set(expense.description),
            date: Set(expense.date.into()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = model.insert(self.db.as_ref()).await.map_err(store_error)?;
        Ok(to_domain(created))
    }

    async fn find(
        &self,
        filter: &ExpenseFilter,
        sort: SortOrder,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Expense>, StoreError> {
        let rows = Self::find_query(filter, sort, skip, limit)
            .all(self.db.as_ref())
            .await
            .map_err(store_error)?;

        Ok(rows.into_iter().map(to_domain).collect())
    }

    async fn count(&self, filter: &ExpenseFilter) -> Result<u64, StoreError> {
        expenses::Entity::find()
            .filter(Self::condition(filter))
            .count(self.db.as_ref())
            .await
            .map_err(store_error)
    }

    async fn update_owned(
        &self,
        id: ExpenseId,
        owner: UserId,
        changes: ExpenseChanges,
    ) -> Result<Option<Expense>, StoreError> {
        let txn = self.db.begin().await.map_err(store_error)?;

        // Row lock keeps a concurrent update from interleaving with this one.
        let Some(current) = expenses::Entity::find()
            .filter(Self::owned(id, owner))
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(store_error)?
        else {
            txn.rollback().await.map_err(store_error)?;
            return Ok(None);
        };

        if changes.is_empty() {
            txn.commit().await.map_err(store_error)?;
            return Ok(Some(to_domain(current)));
        }

        let mut active: expenses::ActiveModel = current.into();
        if let Some(amount) = changes.amount {
            active.amount = Set(amount);
        }
        if let Some(category) = changes.category {
            active.category = Set(category.into());
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(date) = changes.date {
            active.date = Set(date.into());
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&txn).await.map_err(store_error)?;
        txn.commit().await.map_err(store_error)?;

        Ok(Some(to_domain(updated)))
    }

    async fn delete_owned(&self, id: ExpenseId, owner: UserId) -> Result<bool, StoreError> {
        let result = expenses::Entity::delete_many()
            .filter(Self::owned(id, owner))
            .exec(self.db.as_ref())
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
#[path = "expense_tests.rs"]
mod tests;
