pub mod rule_catalog;
pub mod pattern_evaluator;
pub mod token_extractor;
pub mod repo_scanner;
pub mod source_scanner;
pub mod sarif_reader;
pub mod sarif_writer;
pub mod renderers;
pub mod compliance_mapper;
pub mod sarif_processor;
pub mod quality_gates;
pub mod template_renderer;
pub mod compliance_reporter;
pub mod policy_checker;
pub mod suppression_loader;
