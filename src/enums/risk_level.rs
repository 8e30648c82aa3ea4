use serde::{Deserialize, Serialize};
use crate::enums::severity::Severity;

/// Used both for the report-wide risk level and per-finding remediation priority.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn from_critical_count(critical: usize) -> Self {
        if critical > 5 {
            Self::High
        } else if critical > 0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn remediation_priority(severity: Severity) -> Self {
        match severity {
            Severity::Critical => Self::High,
            Severity::High => Self::Medium,
            Severity::Medium | Severity::Low => Self::Low,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}
