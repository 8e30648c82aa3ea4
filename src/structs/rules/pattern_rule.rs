use crate::enums::rule_category::RuleCategory;
use crate::enums::severity::Severity;
use crate::structs::rules::glob_pattern::GlobPattern;

/// A compiled rule. Immutable once its rule set has loaded.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub id: String,
    pub category: RuleCategory,
    pub patterns: Vec<GlobPattern>,
    pub allow_patterns: Vec<GlobPattern>,
    pub severity: Severity,
    pub compliance_tag: String,
    pub message: String,
}

impl PatternRule {
    /// First pattern (in declaration order) matching the normalised text.
    pub fn first_match(&self, normalized: &str) -> Option<&GlobPattern> {
        self.patterns.iter().find(|p| p.matches_normalized(normalized))
    }

    pub fn is_allowed(&self, normalized: &str) -> bool {
        self.allow_patterns.iter().any(|p| p.matches_normalized(normalized))
    }
}
