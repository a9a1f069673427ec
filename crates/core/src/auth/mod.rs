//! Authentication helpers.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Email normalization for account lookup

mod email;
mod password;

pub use email::normalize_email;
pub use password::{MIN_PASSWORD_LEN, PasswordError, hash_password, verify_password};
