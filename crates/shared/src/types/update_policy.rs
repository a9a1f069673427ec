//! Partial-update field selection policy.

use serde::{Deserialize, Serialize};

/// Decides which fields of a partial update count as "provided".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePolicy {
    /// A field is applied iff it is present in the request.
    #[default]
    Presence,
    /// A field is applied only if it is present and truthy: zero amounts and
    /// empty strings keep the stored value. Compatibility mode only.
    LegacyTruthy,
}

impl UpdatePolicy {
    /// Returns true for the compatibility mode.
    #[must_use]
    pub const fn is_legacy(self) -> bool {
        matches!(self, Self::LegacyTruthy)
    }
}

impl std::fmt::Display for UpdatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Presence => write!(f, "presence"),
            Self::LegacyTruthy => write!(f, "legacy_truthy"),
        }
    }
}
