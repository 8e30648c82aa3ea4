pub mod glob_pattern;
pub mod pattern_rule;
pub mod rule_set;
pub mod match_result;
