pub mod commands;
pub mod severity;
pub mod rule_category;
pub mod token_kind;
pub mod output_format;
pub mod framework;
pub mod compliance_status;
pub mod gate_status;
pub mod risk_level;
pub mod dependency_verdict;
pub mod gate_violation;
