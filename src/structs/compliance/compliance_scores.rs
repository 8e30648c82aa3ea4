use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// `{"frameworks": {"rbi": {"score": 92.5}, ...}}` as consumed by the quality gate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceScores {
    #[serde(default)]
    pub frameworks: BTreeMap<String, ScoreEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoreEntry {
    #[serde(default)]
    pub score: f64,
}
