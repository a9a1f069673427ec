//! Repository abstractions for data access.
//!
//! Repositories implement the core store traits, hiding the `SeaORM`
//! implementation details from the rest of the application.

pub mod expense;
pub mod user;

pub use expense::ExpenseRepository;
pub use user::UserRepository;

use sea_orm::{DbErr, SqlErr};
use tally_core::store::StoreError;

/// Maps a database error onto the store contract.
///
/// `users.email` is the only unique column, so a unique violation means the
/// address is already taken. Everything else is `Backend`.
pub(crate) fn store_error(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!(detail = %detail, "Unique constraint violated");
            StoreError::Conflict("Email already registered".to_string())
        }
        _ => StoreError::Backend(err.to_string()),
    }
}
