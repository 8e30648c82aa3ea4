use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::enums::dependency_verdict::DependencyVerdict;
use crate::structs::policy::dependency::Dependency;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyCheck {
    pub dependency: Dependency,
    #[serde(flatten)]
    pub verdict: DependencyVerdict,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyReport {
    pub checked_at: DateTime<Utc>,
    pub policy_version: Option<String>,
    pub violations: usize,
    pub results: Vec<DependencyCheck>,
}

impl PolicyReport {
    pub fn new(policy_version: Option<String>, results: Vec<DependencyCheck>) -> Self {
        Self {
            checked_at: Utc::now(),
            policy_version,
            violations: results.iter().filter(|r| r.verdict.is_violation()).count(),
            results,
        }
    }

    pub const fn passed(&self) -> bool {
        self.violations == 0
    }
}
