use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::enums::severity::Severity;
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SeverityGate {
    pub max_allowed: usize,
    pub fail_build: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ComplianceGate {
    pub min_score: f64,
    pub fail_build: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GatesConfig {
    /// Keyed by severity name (`critical`, `high`, `medium`, `low`).
    #[serde(default = "ConfigHelper::default_severity_gates")]
    pub severity: BTreeMap<String, SeverityGate>,

    /// Keyed by framework key (`rbi`, `sebi`, `iso27001`).
    #[serde(default = "ConfigHelper::default_compliance_gates")]
    pub compliance: BTreeMap<String, ComplianceGate>,

    #[serde(default = "ConfigHelper::default_critical_rules")]
    pub critical_rules: Vec<String>,
}

impl GatesConfig {
    pub fn severity_gate(&self, severity: Severity) -> Option<&SeverityGate> {
        self.severity.get(severity.as_str())
    }

    pub fn severity_gate_mut(&mut self, severity: Severity) -> Option<&mut SeverityGate> {
        self.severity.get_mut(severity.as_str())
    }
}

impl Default for GatesConfig {
    fn default() -> Self {
        Self {
            severity: ConfigHelper::default_severity_gates(),
            compliance: ConfigHelper::default_compliance_gates(),
            critical_rules: ConfigHelper::default_critical_rules(),
        }
    }
}
