use serde::{Deserialize, Serialize};
use crate::enums::framework::Framework;
use crate::enums::severity::Severity;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ControlMapping {
    pub framework: Framework,
    pub control: String,
    pub description: String,
    pub category: String,
    pub severity_impact: Severity,
}
