use serde::{Deserialize, Serialize};
use crate::enums::severity::Severity;
use crate::structs::gates::critical_rule_hit::CriticalRuleHit;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GateViolation {
    SecurityFinding {
        severity: Severity,
        count: usize,
        max_allowed: usize,
        fail_build: bool,
        message: String,
    },
    ComplianceScore {
        framework: String,
        score: f64,
        min_score: f64,
        fail_build: bool,
        message: String,
    },
    FinancialSecurityViolation {
        violations: Vec<CriticalRuleHit>,
        fail_build: bool,
        message: String,
    },
}

impl GateViolation {
    pub const fn fail_build(&self) -> bool {
        match self {
            Self::SecurityFinding { fail_build, .. }
            | Self::ComplianceScore { fail_build, .. }
            | Self::FinancialSecurityViolation { fail_build, .. } => *fail_build,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::SecurityFinding { message, .. }
            | Self::ComplianceScore { message, .. }
            | Self::FinancialSecurityViolation { message, .. } => message,
        }
    }
}
