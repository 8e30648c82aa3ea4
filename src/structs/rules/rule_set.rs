use crate::enums::rule_category::RuleCategory;
use crate::structs::rules::pattern_rule::PatternRule;

#[derive(Debug, Clone)]
pub struct RuleSet {
    pub name: String,
    pub category: RuleCategory,
    pub rules: Vec<PatternRule>,
}
