use serde::{Deserialize, Serialize};
use crate::enums::rule_category::RuleCategory;
use crate::helpers::config_helper::ConfigHelper;
use crate::structs::config::pattern_rule::PatternRuleConfig;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RulesConfig {
    #[serde(default = "ConfigHelper::default_include_builtin")]
    pub include_builtin: bool,

    /// Sets named like a built-in set replace it.
    #[serde(default)]
    pub rule_sets: Vec<RuleSetConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RuleSetConfig {
    pub name: String,
    pub category: RuleCategory,

    #[serde(default)]
    pub rules: Vec<PatternRuleConfig>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            include_builtin: ConfigHelper::default_include_builtin(),
            rule_sets: Vec::new(),
        }
    }
}
