pub mod cli;
pub mod config;
pub mod rules;
pub mod source;
pub mod sarif;
pub mod compliance;
pub mod gates;
pub mod policy;
pub mod validation_result;
