use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::enums::gate_status::GateStatus;
use crate::enums::gate_violation::GateViolation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityGateReport {
    pub quality_gate_status: GateStatus,
    pub timestamp: DateTime<Utc>,
    pub findings_summary: BTreeMap<String, usize>,
    pub violations: Vec<GateViolation>,
    pub build_decision: GateStatus,
}

impl QualityGateReport {
    pub fn from_violations(findings_summary: BTreeMap<String, usize>, violations: Vec<GateViolation>) -> Self {
        let (status, decision) = if violations.iter().any(GateViolation::fail_build) {
            (GateStatus::Fail, GateStatus::Fail)
        } else if violations.is_empty() {
            (GateStatus::Pass, GateStatus::Pass)
        } else {
            (GateStatus::Warning, GateStatus::Pass)
        };

        Self {
            quality_gate_status: status,
            timestamp: Utc::now(),
            findings_summary,
            violations,
            build_decision: decision,
        }
    }

    pub fn failing_violations(&self) -> usize {
        self.violations.iter().filter(|v| v.fail_build()).count()
    }

    pub fn total_findings(&self) -> usize {
        self.findings_summary.values().sum()
    }
}
