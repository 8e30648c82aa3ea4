use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use crate::enums::rule_category::RuleCategory;
use crate::enums::severity::Severity;
use crate::structs::rules::match_result::MatchResult;

#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub root: String,
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub suppressed_findings: usize,
    pub summary: ScanSummary,
    pub findings: Vec<MatchResult>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSummary {
    pub total_findings: usize,
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_category: BTreeMap<RuleCategory, usize>,
}

impl ScanSummary {
    pub fn from_findings(findings: &[MatchResult]) -> Self {
        let mut summary = Self {
            total_findings: findings.len(),
            ..Self::default()
        };
        for finding in findings {
            *summary.by_severity.entry(finding.severity).or_insert(0) += 1;
            *summary.by_category.entry(finding.category).or_insert(0) += 1;
        }
        summary
    }
}

impl ScanReport {
    pub fn new(root: &str, findings: Vec<MatchResult>, files_scanned: usize, files_skipped: usize, suppressed_findings: usize) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            root: root.to_string(),
            files_scanned,
            files_skipped,
            suppressed_findings,
            summary: ScanSummary::from_findings(&findings),
            findings,
        }
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }

    pub fn has_findings_at_or_above(&self, threshold: Severity) -> bool {
        self.highest_severity().is_some_and(|s| s >= threshold)
    }
}
