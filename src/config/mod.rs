pub mod builtin_rules;
pub mod config_manager;
pub mod constants;
