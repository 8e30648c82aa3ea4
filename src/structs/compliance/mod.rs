pub mod control_mapping;
pub mod processed_result;
pub mod sarif_processing_report;
pub mod compliance_report;
pub mod compliance_scores;
