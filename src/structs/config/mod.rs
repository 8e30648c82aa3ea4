pub mod config;
pub mod rules_config;
pub mod pattern_rule;
pub mod scan_config;
pub mod gates_config;
pub mod output_config;
