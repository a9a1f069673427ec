//! `SeaORM` active enums mirroring the PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use tally_core::expense::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "expense_category")]
pub enum ExpenseCategory {
    #[sea_orm(string_value = "Groceries")]
    Groceries,
    #[sea_orm(string_value = "Leisure")]
    Leisure,
    #[sea_orm(string_value = "Electronics")]
    Electronics,
    #[sea_orm(string_value = "Utilities")]
    Utilities,
    #[sea_orm(string_value = "Clothing")]
    Clothing,
    #[sea_orm(string_value = "Health")]
    Health,
    #[sea_orm(string_value = "Others")]
    Others,
}

impl From<Category> for ExpenseCategory {
    fn from(category: Category) -> Self {
        match category {
            Category::Groceries => Self::Groceries,
            Category::Leisure => Self::Leisure,
            Category::Electronics => Self::Electronics,
            Category::Utilities => Self::Utilities,
            Category::Clothing => Self::Clothing,
            Category::Health => Self::Health,
            Category::Others => Self::Others,
        }
    }
}

impl From<ExpenseCategory> for Category {
    fn from(category: ExpenseCategory) -> Self {
        match category {
            ExpenseCategory::Groceries => Self::Groceries,
            ExpenseCategory::Leisure => Self::Leisure,
            ExpenseCategory::Electronics => Self::Electronics,
            ExpenseCategory::Utilities => Self::Utilities,
            ExpenseCategory::Clothing => Self::Clothing,
            ExpenseCategory::Health => Self::Health,
            ExpenseCategory::Others => Self::Others,
        }
    }
}
