use serde::{Deserialize, Serialize};
use crate::enums::severity::Severity;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PatternRuleConfig {
    pub id: String,
    pub patterns: Vec<String>,

    #[serde(default)]
    pub allow_patterns: Vec<String>,

    #[serde(default)]
    pub severity: Severity,

    #[serde(default)]
    pub compliance_tag: String,

    #[serde(default)]
    pub message: String,
}
