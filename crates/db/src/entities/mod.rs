//! `SeaORM` entity definitions.

pub mod expenses;
pub mod sea_orm_active_enums;
pub mod users;
