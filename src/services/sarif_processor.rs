use std::collections::BTreeMap;
use std::path::Path;
use chrono::Utc;
use crate::config::constants::PROCESSOR_VERSION;
use crate::enums::compliance_status::ComplianceStatus;
use crate::enums::framework::Framework;
use crate::enums::severity::Severity;
use crate::errors::GuardResult;
use crate::services::compliance_mapper::ComplianceMapper;
use crate::services::sarif_reader::SarifReader;
use crate::structs::compliance::processed_result::{ProcessedResult, ResultLocation};
use crate::structs::compliance::sarif_processing_report::{ProcessingMetadata, SarifProcessingReport, SarifSummary};
use crate::structs::sarif::sarif_log::{SarifLog, SarifResult};

/// Annotates SARIF results with regulatory control mappings and summarises them.
pub struct SarifProcessor {
    mapper: ComplianceMapper,
}

impl Default for SarifProcessor {
    fn default() -> Self {
        Self::new(ComplianceMapper::all())
    }
}

impl SarifProcessor {
    pub const fn new(mapper: ComplianceMapper) -> Self {
        Self { mapper }
    }

    pub fn process_log(&self, log: &SarifLog) -> Vec<ProcessedResult> {
        log.runs
            .iter()
            .flat_map(|run| run.results.iter())
            .map(|result| self.process_result(result))
            .collect()
    }

    pub fn process_result(&self, result: &SarifResult) -> ProcessedResult {
        let rule_id = result.rule_id.clone().unwrap_or_default();
        let level = result.level.clone().unwrap_or_else(|| "note".to_string());
        let severity = Severity::from_sarif_level(Some(&level));

        ProcessedResult {
            compliance_mappings: self.mapper.map(&rule_id, severity),
            rule_id,
            message: result.message.text.clone(),
            level,
            severity,
            locations: result.locations.iter().map(ResultLocation::from).collect(),
            fingerprints: result.fingerprints.clone(),
            processed_at: Utc::now(),
        }
    }

    pub fn summarize(results: &[ProcessedResult]) -> SarifSummary {
        let mut by_severity: BTreeMap<String, usize> =
            Severity::ALL.iter().map(|s| (s.as_str().to_string(), 0)).collect();
        let mut by_framework: BTreeMap<String, usize> =
            Framework::ALL.iter().map(|f| (f.key().to_string(), 0)).collect();

        for result in results {
            *by_severity.entry(result.severity.as_str().to_string()).or_insert(0) += 1;

            // A result counts once per framework, however many controls it hits.
            for framework in Framework::ALL {
                if result.compliance_mappings.iter().any(|m| m.framework == framework) {
                    *by_framework.entry(framework.key().to_string()).or_insert(0) += 1;
                }
            }
        }

        let critical = by_severity.get(Severity::Critical.as_str()).copied().unwrap_or(0);
        let high = by_severity.get(Severity::High.as_str()).copied().unwrap_or(0);

        SarifSummary {
            total_findings: results.len(),
            by_severity,
            by_framework,
            compliance_status: ComplianceStatus::from_counts(critical, high),
            generated_at: Utc::now(),
        }
    }

    pub async fn process_file(&self, path: &Path) -> GuardResult<SarifProcessingReport> {
        log::info!("🔍 Processing SARIF file {}", path.display());
        let log = SarifReader::read_file(path).await?;
        let detailed_results = self.process_log(&log);
        let summary = Self::summarize(&detailed_results);

        log::info!(
            "📊 {} findings, status {}",
            summary.total_findings,
            summary.compliance_status.as_str()
        );

        Ok(SarifProcessingReport {
            metadata: ProcessingMetadata {
                sarif_file: path.to_string_lossy().to_string(),
                processed_at: Utc::now(),
                processor_version: PROCESSOR_VERSION.to_string(),
            },
            summary,
            detailed_results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with(results: &[(&str, Option<&str>)]) -> SarifLog {
        let results: Vec<serde_json::Value> = results
            .iter()
            .map(|(rule, level)| {
                let mut value = serde_json::json!({"ruleId": rule, "message": {"text": "m"}});
                if let Some(level) = level {
                    value["level"] = serde_json::json!(level);
                }
                value
            })
            .collect();
        let json = serde_json::json!({"version": "2.1.0", "runs": [{"tool": {"driver": {"name": "t"}}, "results": results}]});
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn levels_map_to_severities_with_note_as_default() {
        let processor = SarifProcessor::default();
        let results = processor.process_log(&log_with(&[
            ("a", Some("error")),
            ("b", Some("warning")),
            ("c", None),
            ("d", Some("none")),
        ]));
        let severities: Vec<_> = results.iter().map(|r| r.severity).collect();
        assert_eq!(severities, vec![Severity::Critical, Severity::High, Severity::Medium, Severity::Low]);
        assert_eq!(results[2].level, "note");
    }

    #[test]
    fn summary_counts_frameworks_once_per_result() {
        let processor = SarifProcessor::default();
        let results = processor.process_log(&log_with(&[("java/sql-injection", Some("warning"))]));
        let summary = SarifProcessor::summarize(&results);

        assert_eq!(summary.by_framework["rbi"], 1);
        assert_eq!(summary.by_framework["iso27001"], 1);
        assert_eq!(summary.by_framework["sebi"], 0);
        assert_eq!(summary.compliance_status, ComplianceStatus::MediumRisk);
    }

    #[test]
    fn any_error_level_result_is_critical() {
        let processor = SarifProcessor::default();
        let results = processor.process_log(&log_with(&[("x", Some("note")), ("y", Some("error"))]));
        assert_eq!(SarifProcessor::summarize(&results).compliance_status, ComplianceStatus::Critical);
    }

    #[test]
    fn six_high_findings_are_high_risk() {
        let processor = SarifProcessor::default();
        let entries: Vec<_> = (0..6).map(|_| ("x", Some("warning"))).collect();
        let results = processor.process_log(&log_with(&entries));
        assert_eq!(SarifProcessor::summarize(&results).compliance_status, ComplianceStatus::HighRisk);
    }

    #[test]
    fn empty_log_passes_with_zeroed_counters() {
        let summary = SarifProcessor::summarize(&[]);
        assert_eq!(summary.compliance_status, ComplianceStatus::Pass);
        assert_eq!(summary.by_severity.len(), 4);
        assert_eq!(summary.by_framework.len(), 3);
    }
}
