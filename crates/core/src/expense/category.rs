//! The closed set of expense categories.

use serde::{Deserialize, Serialize};

/// Classification label for an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Food and household supplies.
    Groceries,
    /// Entertainment and going out.
    Leisure,
    /// Devices and gadgets.
    Electronics,
    /// Power, water, internet and similar bills.
    Utilities,
    /// Clothes and shoes.
    Clothing,
    /// Medical and wellbeing costs.
    Health,
    /// Anything else.
    Others,
}

/// Error returned when a label is outside the category set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 7] = [
        Self::Groceries,
        Self::Leisure,
        Self::Electronics,
        Self::Utilities,
        Self::Clothing,
        Self::Health,
        Self::Others,
    ];

    /// Returns the label used on the wire and in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Groceries => "Groceries",
            Self::Leisure => "Leisure",
            Self::Electronics => "Electronics",
            Self::Utilities => "Utilities",
            Self::Clothing => "Clothing",
            Self::Health => "Health",
            Self::Others => "Others",
        }
    }

    /// Comma-separated list of every label, for error messages.
    #[must_use]
    pub fn labels() -> String {
        Self::ALL
            .iter()
            .map(|category| category.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    /// Labels are matched exactly; `groceries` is not `Groceries`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
