use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::enums::framework::Framework;
use crate::enums::risk_level::RiskLevel;
use crate::enums::severity::Severity;
use crate::structs::compliance::compliance_scores::ScoreEntry;
use crate::structs::compliance::control_mapping::ControlMapping;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub metadata: ReportMetadata,
    pub executive_summary: ExecutiveSummary,
    /// Keyed by standard name, e.g. `RBI-IT-Framework`.
    pub compliance_mappings: BTreeMap<String, FrameworkCompliance>,
    pub detailed_findings: Vec<DetailedFinding>,
    pub remediation_summary: BTreeMap<String, usize>,
    pub audit_trail: Vec<AuditEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub standards: Vec<Framework>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub total_findings: usize,
    pub critical_findings: usize,
    pub compliance_score: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameworkCompliance {
    pub total_controls: usize,
    pub failed_controls: usize,
    pub compliance_percentage: f64,
    pub findings_by_control: BTreeMap<String, ControlStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlStats {
    pub total_findings: usize,
    pub critical_findings: usize,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedFinding {
    pub rule_id: String,
    pub level: String,
    pub severity: Severity,
    pub message: String,
    pub source_file: String,
    pub compliance_mappings: Vec<ControlMapping>,
    pub remediation_priority: RiskLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub details: String,
}

/// The short form written next to the full report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub metadata: ReportMetadata,
    pub executive_summary: ExecutiveSummary,
    pub compliance_scores: BTreeMap<String, FrameworkScore>,
    /// Keyed by framework key so the quality gate can read this file directly.
    pub frameworks: BTreeMap<String, ScoreEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkScore {
    pub compliance_percentage: f64,
    pub failed_controls: usize,
    pub total_controls: usize,
}
