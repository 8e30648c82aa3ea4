use serde::{Deserialize, Serialize};
use crate::enums::rule_category::RuleCategory;
use crate::enums::severity::Severity;
use crate::structs::rules::pattern_rule::PatternRule;
use crate::structs::source::source_location::SourceLocation;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub rule_id: String,
    pub category: RuleCategory,
    pub severity: Severity,
    pub compliance_tag: String,
    pub message: String,
    pub matched_text: String,
    pub matched_pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_location: Option<SourceLocation>,
}

impl MatchResult {
    pub fn new(rule: &PatternRule, matched_text: &str, matched_pattern: &str) -> Self {
        Self {
            rule_id: rule.id.clone(),
            category: rule.category,
            severity: rule.severity,
            compliance_tag: rule.compliance_tag.clone(),
            message: rule.message.clone(),
            matched_text: matched_text.to_string(),
            matched_pattern: matched_pattern.to_string(),
            source_location: None,
        }
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.source_location = Some(location);
        self
    }
}
