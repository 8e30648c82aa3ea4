use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::enums::compliance_status::ComplianceStatus;
use crate::structs::compliance::processed_result::ProcessedResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifProcessingReport {
    pub metadata: ProcessingMetadata,
    pub summary: SarifSummary,
    pub detailed_results: Vec<ProcessedResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingMetadata {
    pub sarif_file: String,
    pub processed_at: DateTime<Utc>,
    pub processor_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifSummary {
    pub total_findings: usize,
    /// Always carries `critical`, `high`, `medium` and `low`.
    pub by_severity: BTreeMap<String, usize>,
    /// Always carries `rbi`, `iso27001` and `sebi`.
    pub by_framework: BTreeMap<String, usize>,
    pub compliance_status: ComplianceStatus,
    pub generated_at: DateTime<Utc>,
}
