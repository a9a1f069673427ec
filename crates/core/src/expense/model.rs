//! Expense records and the inputs that create or change them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tally_shared::types::{ExpenseId, UpdatePolicy, UserId};

use super::category::Category;

/// A stored expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    /// Identifier assigned at creation.
    pub id: ExpenseId,
    /// Owner; never reassigned.
    pub user_id: UserId,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Classification.
    pub category: Category,
    /// Trimmed description.
    pub description: String,
    /// Effective date.
    pub date: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated creation input from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateExpense {
    /// Non-negative amount.
    pub amount: Decimal,
    /// Classification.
    pub category: Category,
    /// Description; trimmed before storing.
    pub description: String,
    /// Effective date; defaults to the creation time.
    pub date: Option<DateTime<Utc>>,
}

/// A fully-resolved record ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// Owner.
    pub owner: UserId,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Classification.
    pub category: Category,
    /// Trimmed description.
    pub description: String,
    /// Effective date.
    pub date: DateTime<Utc>,
}

impl NewExpense {
    /// Resolves a creation request for `owner`, defaulting the date to `now`.
    #[must_use]
    pub fn from_request(owner: UserId, request: CreateExpense, now: DateTime<Utc>) -> Self {
        Self {
            owner,
            amount: request.amount,
            category: request.category,
            description: request.description.trim().to_string(),
            date: request.date.unwrap_or(now),
        }
    }
}

/// Partial update as received. `None` means the field was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpensePatch {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New category.
    pub category: Option<Category>,
    /// New description.
    pub description: Option<String>,
    /// New effective date.
    pub date: Option<DateTime<Utc>>,
}

impl ExpensePatch {
    /// Decides which fields to apply under `policy`.
    ///
    /// `Presence` applies every present field. `LegacyTruthy` additionally
    /// drops a zero amount and an empty description, so they leave the stored
    /// values untouched.
    #[must_use]
    pub fn resolve(self, policy: UpdatePolicy) -> ExpenseChanges {
        let description = self.description.map(|d| d.trim().to_string());

        match policy {
            UpdatePolicy::Presence => ExpenseChanges {
                amount: self.amount,
                category: self.category,
                description,
                date: self.date,
            },
            UpdatePolicy::LegacyTruthy => ExpenseChanges {
                amount: self.amount.filter(|a| !a.is_zero()),
                category: self.category,
                description: description.filter(|d| !d.is_empty()),
                date: self.date,
            },
        }
    }
}

/// Field changes to apply to a stored expense.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseChanges {
    /// Replacement amount.
    pub amount: Option<Decimal>,
    /// Replacement category.
    pub category: Option<Category>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement date.
    pub date: Option<DateTime<Utc>>,
}

impl ExpenseChanges {
    /// Returns true if nothing would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.date.is_none()
    }

    /// Applies the changes to `expense` in place, stamping `updated_at`.
    pub fn apply(self, expense: &mut Expense, now: DateTime<Utc>) {
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(description) = self.description {
            expense.description = description;
        }
        if let Some(date) = self.date {
            expense.date = date;
        }
        expense.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn patch(amount: Option<Decimal>, description: Option<&str>) -> ExpensePatch {
        ExpensePatch {
            amount,
            description: description.map(str::to_string),
            ..ExpensePatch::default()
        }
    }

    #[test]
    fn test_presence_applies_zero_amount() {
        let changes = patch(Some(Decimal::ZERO), None).resolve(UpdatePolicy::Presence);
        assert_eq!(changes.amount, Some(Decimal::ZERO));
    }

    #[test]
    fn test_legacy_drops_zero_amount() {
        let changes = patch(Some(Decimal::ZERO), None).resolve(UpdatePolicy::LegacyTruthy);
        assert_eq!(changes.amount, None);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_legacy_keeps_nonzero_amount() {
        let changes = patch(Some(dec!(12.5)), None).resolve(UpdatePolicy::LegacyTruthy);
        assert_eq!(changes.amount, Some(dec!(12.5)));
    }

    #[test]
    fn test_legacy_drops_empty_description() {
        let changes = patch(None, Some("  ")).resolve(UpdatePolicy::LegacyTruthy);
        assert_eq!(changes.description, None);
    }

    #[test]
    fn test_description_is_trimmed() {
        let changes = patch(None, Some("  Lunch ")).resolve(UpdatePolicy::Presence);
        assert_eq!(changes.description.as_deref(), Some("Lunch"));
    }

    #[test]
    fn test_new_expense_defaults_date_and_trims() {
        let now = Utc::now();
        let owner = UserId::new();
        let new = NewExpense::from_request(
            owner,
            CreateExpense {
                amount: dec!(3),
                category: Category::Health,
                description: " Plasters ".to_string(),
                date: None,
            },
            now,
        );

        assert_eq!(new.owner, owner);
        assert_eq!(new.date, now);
        assert_eq!(new.description, "Plasters");
    }

    #[test]
    fn test_apply_only_touches_present_fields() {
        let now = Utc::now();
        let mut expense = Expense {
            id: ExpenseId::new(),
            user_id: UserId::new(),
            amount: dec!(10),
            category: Category::Leisure,
            description: "Cinema".to_string(),
            date: now,
            created_at: now,
            updated_at: now,
        };
        let before = expense.clone();
        let later = now + chrono::Duration::seconds(5);

        ExpenseChanges {
            description: Some("Concert".to_string()),
            ..ExpenseChanges::default()
        }
        .apply(&mut expense, later);

        assert_eq!(expense.description, "Concert");
        assert_eq!(expense.amount, before.amount);
        assert_eq!(expense.category, before.category);
        assert_eq!(expense.date, before.date);
        assert_eq!(expense.updated_at, later);
    }
}
