use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Eq, PartialEq)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum DependencyVerdict {
    Approved,
    BelowMinimum { minimum: String },
    Conditional { conditions: Vec<String> },
    ConditionalExpired { expired_on: NaiveDate },
    Prohibited { reason: String },
    Unlisted,
    Suppressed { notes: String },
}

impl DependencyVerdict {
    pub const fn is_violation(&self) -> bool {
        matches!(
            self,
            Self::BelowMinimum { .. } | Self::ConditionalExpired { .. } | Self::Prohibited { .. }
        )
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::BelowMinimum { .. } => "below-minimum",
            Self::Conditional { .. } => "conditional",
            Self::ConditionalExpired { .. } => "conditional-expired",
            Self::Prohibited { .. } => "prohibited",
            Self::Unlisted => "unlisted",
            Self::Suppressed { .. } => "suppressed",
        }
    }

    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Approved => "✅",
            Self::Conditional { .. } | Self::Unlisted => "⚠️",
            Self::Suppressed { .. } => "🔕",
            Self::BelowMinimum { .. } | Self::ConditionalExpired { .. } | Self::Prohibited { .. } => "❌",
        }
    }
}
