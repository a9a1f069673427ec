//! Common types used across the application.

pub mod id;
pub mod pagination;
pub mod update_policy;

pub use id::*;
pub use pagination::{PageMeta, PageRequest, PageResponse};
pub use update_policy::UpdatePolicy;
