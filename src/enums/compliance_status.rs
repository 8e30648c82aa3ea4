use serde::{Deserialize, Serialize};

/// Overall status of a processed SARIF log.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Pass,
    MediumRisk,
    HighRisk,
    Critical,
}

impl ComplianceStatus {
    pub const fn from_counts(critical: usize, high: usize) -> Self {
        if critical > 0 {
            Self::Critical
        } else if high > 5 {
            Self::HighRisk
        } else if high > 0 {
            Self::MediumRisk
        } else {
            Self::Pass
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::MediumRisk => "MEDIUM_RISK",
            Self::HighRisk => "HIGH_RISK",
            Self::Critical => "CRITICAL",
        }
    }
}
