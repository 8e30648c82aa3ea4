use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CriticalRuleHit {
    pub rule: String,
    pub rule_id: String,
    pub message: String,
    pub level: String,
}
