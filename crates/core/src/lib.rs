//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and query construction live here;
//! persistence is reached only through the traits in [`store`].
//!
//! # Modules
//!
//! - `auth` - Password hashing and email normalization
//! - `expense` - Expense model, date-range resolution, query building, service
//! - `store` - Store contracts implemented by the database layer

pub mod auth;
pub mod expense;
pub mod store;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
