//! User repository for database operations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use tally_core::store::{NewUser, StoreError, User, UserStore};
use tally_shared::types::UserId;

use super::store_error;
use crate::entities::users;

/// User repository for account lookup and creation.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_domain(model: users::Model) -> User {
    User {
        id: UserId::from_uuid(model.id),
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let now = Utc::now().into();
        let model = users::ActiveModel {
            id: Set(UserId::new().into_inner()),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = model.insert(self.db.as_ref()).await.map_err(store_error)?;
        Ok(to_domain(created))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let found = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(store_error)?;

        Ok(found.map(to_domain))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let found = users::Entity::find_by_id(id.into_inner())
            .one(self.db.as_ref())
            .await
            .map_err(store_error)?;

        Ok(found.map(to_domain))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(self.db.as_ref())
            .await
            .map_err(store_error)?;

        Ok(count > 0)
    }
}
