use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use chrono::Utc;
use uuid::Uuid;
use crate::config::constants::{
    DEFAULT_REPORT_TEMPLATE, PROCESSOR_VERSION, REPORT_JSON_FILE, REPORT_MARKDOWN_FILE, REPORT_SUMMARY_FILE,
};
use crate::enums::framework::Framework;
use crate::enums::risk_level::RiskLevel;
use crate::enums::severity::Severity;
use crate::errors::{GuardError, GuardResult};
use crate::services::compliance_mapper::ComplianceMapper;
use crate::services::sarif_reader::SarifReader;
use crate::services::template_renderer::TemplateRenderer;
use crate::structs::compliance::compliance_report::{
    AuditEntry, ComplianceReport, ComplianceSummary, ControlStats, DetailedFinding, ExecutiveSummary,
    FrameworkCompliance, FrameworkScore, ReportMetadata,
};
use crate::structs::compliance::compliance_scores::ScoreEntry;
use crate::structs::sarif::sarif_log::SarifLog;

/// Builds the audit-facing compliance report from a set of SARIF logs.
pub struct ComplianceReporter {
    standards: Vec<Framework>,
    mapper: ComplianceMapper,
}

impl ComplianceReporter {
    pub fn new(standards: &[Framework]) -> Self {
        Self {
            standards: standards.to_vec(),
            mapper: ComplianceMapper::new(standards),
        }
    }

    pub fn build(&self, logs: &[(PathBuf, SarifLog)]) -> ComplianceReport {
        let mut report = ComplianceReport {
            metadata: ReportMetadata {
                report_id: Uuid::new_v4(),
                generated_at: Utc::now(),
                version: PROCESSOR_VERSION.to_string(),
                standards: self.standards.clone(),
            },
            executive_summary: ExecutiveSummary {
                total_findings: 0,
                critical_findings: 0,
                compliance_score: 100.0,
                risk_level: RiskLevel::Low,
            },
            compliance_mappings: self
                .standards
                .iter()
                .map(|f| {
                    let initial = FrameworkCompliance {
                        compliance_percentage: 100.0,
                        ..FrameworkCompliance::default()
                    };
                    (f.standard_name().to_string(), initial)
                })
                .collect(),
            detailed_findings: Vec::new(),
            remediation_summary: BTreeMap::new(),
            audit_trail: Vec::new(),
        };

        for (path, log) in logs {
            let source_file = path.to_string_lossy().to_string();
            let mut processed = 0;

            for result in log.runs.iter().flat_map(|r| r.results.iter()) {
                let level = result.level.clone().unwrap_or_else(|| "note".to_string()).to_lowercase();
                let severity = Severity::from_sarif_level(Some(&level));
                let rule_id = result.rule_id_or_unknown().to_string();
                let mappings = self.mapper.map(&rule_id, severity);

                report.executive_summary.total_findings += 1;
                if severity == Severity::Critical {
                    report.executive_summary.critical_findings += 1;
                }

                for mapping in &mappings {
                    let Some(framework) = report.compliance_mappings.get_mut(mapping.framework.standard_name()) else {
                        continue;
                    };
                    let stats = framework
                        .findings_by_control
                        .entry(mapping.control.clone())
                        .or_insert_with(|| ControlStats {
                            total_findings: 0,
                            critical_findings: 0,
                            description: mapping.description.clone(),
                        });
                    stats.total_findings += 1;
                    if severity == Severity::Critical {
                        stats.critical_findings += 1;
                    }
                }

                let priority = RiskLevel::remediation_priority(severity);
                *report.remediation_summary.entry(priority.as_str().to_string()).or_insert(0) += 1;

                report.detailed_findings.push(DetailedFinding {
                    rule_id,
                    level,
                    severity,
                    message: result.message.text.clone(),
                    source_file: source_file.clone(),
                    compliance_mappings: mappings,
                    remediation_priority: priority,
                });
                processed += 1;
            }

            report.audit_trail.push(AuditEntry {
                timestamp: Utc::now(),
                action: "sarif_processed".to_string(),
                details: format!("{source_file}: {processed} results"),
            });
        }

        Self::finalize(&mut report);
        report
    }

    fn finalize(report: &mut ComplianceReport) {
        for data in report.compliance_mappings.values_mut() {
            let failed = data.findings_by_control.values().filter(|c| c.critical_findings > 0).count();
            let total = data.findings_by_control.len().max(1);

            data.failed_controls = failed;
            data.total_controls = total;
            data.compliance_percentage = (100.0 - (failed as f64 / total as f64 * 100.0)).max(0.0);
        }

        report.executive_summary.compliance_score = if report.compliance_mappings.is_empty() {
            100.0
        } else {
            let sum: f64 = report.compliance_mappings.values().map(|d| d.compliance_percentage).sum();
            sum / report.compliance_mappings.len() as f64
        };
        report.executive_summary.risk_level = RiskLevel::from_critical_count(report.executive_summary.critical_findings);

        report.audit_trail.push(AuditEntry {
            timestamp: Utc::now(),
            action: "report_generated".to_string(),
            details: format!(
                "{} findings, score {:.1}",
                report.executive_summary.total_findings, report.executive_summary.compliance_score
            ),
        });
    }

    pub fn summary(report: &ComplianceReport) -> ComplianceSummary {
        let compliance_scores = report
            .compliance_mappings
            .iter()
            .map(|(name, data)| {
                (name.clone(), FrameworkScore {
                    compliance_percentage: data.compliance_percentage,
                    failed_controls: data.failed_controls,
                    total_controls: data.total_controls,
                })
            })
            .collect();

        let frameworks = report
            .metadata
            .standards
            .iter()
            .filter_map(|f| {
                report
                    .compliance_mappings
                    .get(f.standard_name())
                    .map(|data| (f.key().to_string(), ScoreEntry { score: data.compliance_percentage }))
            })
            .collect();

        ComplianceSummary {
            metadata: report.metadata.clone(),
            executive_summary: report.executive_summary.clone(),
            compliance_scores,
            frameworks,
        }
    }

    pub fn render_markdown(report: &ComplianceReport, template: &str) -> String {
        let standards: Vec<&str> = report.metadata.standards.iter().map(|f| f.standard_name()).collect();
        let summary = &report.executive_summary;

        let mut renderer = TemplateRenderer::new();
        renderer
            .set("generated_at", report.metadata.generated_at.to_rfc3339())
            .set("report_id", report.metadata.report_id)
            .set("standards", standards.join(", "))
            .set("total_findings", summary.total_findings)
            .set("critical_findings", summary.critical_findings)
            .set("compliance_score", format!("{:.1}", summary.compliance_score))
            .set("risk_level", summary.risk_level.as_str())
            .set("framework_table", Self::framework_table(report))
            .set("remediation_table", Self::remediation_table(report));
        renderer.render(template)
    }

    fn framework_table(report: &ComplianceReport) -> String {
        if report.compliance_mappings.is_empty() {
            return "_No standards selected._".to_string();
        }

        let mut table = String::from("| Standard | Controls | Failed | Compliance |\n|---|---|---|---|\n");
        for (name, data) in &report.compliance_mappings {
            let _ = writeln!(
                table,
                "| {name} | {} | {} | {:.1}% |",
                data.total_controls, data.failed_controls, data.compliance_percentage
            );
        }
        table
    }

    fn remediation_table(report: &ComplianceReport) -> String {
        let urgent: Vec<&DetailedFinding> = report
            .detailed_findings
            .iter()
            .filter(|f| f.remediation_priority != RiskLevel::Low)
            .collect();

        if urgent.is_empty() {
            return "_No findings require priority remediation._".to_string();
        }

        let mut table = String::from("| Priority | Rule | Controls | Message |\n|---|---|---|---|\n");
        for finding in urgent {
            let controls: Vec<&str> = finding.compliance_mappings.iter().map(|m| m.control.as_str()).collect();
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} |",
                finding.remediation_priority.as_str(),
                finding.rule_id,
                if controls.is_empty() { "-".to_string() } else { controls.join(", ") },
                finding.message.replace('|', "\\|")
            );
        }
        table
    }

    /// Reads every SARIF log under `sarif_dir` and writes the JSON report, the
    /// JSON summary and the Markdown rendering into `output_dir`.
    pub async fn generate(
        &self,
        sarif_dir: &Path,
        output_dir: &Path,
        template: Option<&Path>,
    ) -> GuardResult<ComplianceReport> {
        if !sarif_dir.is_dir() {
            return Err(GuardError::file_error(
                &sarif_dir.to_string_lossy(),
                "read",
                "SARIF directory does not exist",
            ));
        }

        let logs = SarifReader::read_dir(sarif_dir).await?;
        if logs.is_empty() {
            log::warn!("⚠️ No SARIF files found in {}, writing an empty report", sarif_dir.display());
        }

        let template = match template {
            Some(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| GuardError::file_error(&path.to_string_lossy(), "read template", &e.to_string()))?,
            None => DEFAULT_REPORT_TEMPLATE.to_string(),
        };

        let report = self.build(&logs);
        Self::write(&report, output_dir, &template).await?;
        Ok(report)
    }

    pub async fn write(report: &ComplianceReport, output_dir: &Path, template: &str) -> GuardResult<()> {
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| GuardError::file_error(&output_dir.to_string_lossy(), "create directory", &e.to_string()))?;

        let outputs = [
            (REPORT_JSON_FILE, serde_json::to_string_pretty(report)?),
            (REPORT_SUMMARY_FILE, serde_json::to_string_pretty(&Self::summary(report))?),
            (REPORT_MARKDOWN_FILE, Self::render_markdown(report, template)),
        ];

        for (name, content) in outputs {
            let path = output_dir.join(name);
            tokio::fs::write(&path, content)
                .await
                .map_err(|e| GuardError::file_error(&path.to_string_lossy(), "write", &e.to_string()))?;
            log::info!("📝 Wrote {}", path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sarif(results: &[(&str, &str)]) -> SarifLog {
        let results: Vec<_> = results
            .iter()
            .map(|(rule, level)| serde_json::json!({"ruleId": rule, "level": level, "message": {"text": "m"}}))
            .collect();
        serde_json::from_value(serde_json::json!({"version": "2.1.0", "runs": [{"results": results}]})).unwrap()
    }

    #[test]
    fn critical_finding_fails_its_control() {
        let reporter = ComplianceReporter::new(&[Framework::Rbi, Framework::Iso27001]);
        let logs = vec![(
            PathBuf::from("codeql/java.sarif"),
            sarif(&[("java/sql-injection", "error"), ("java/weak-cryptographic-algorithm", "warning")]),
        )];

        let report = reporter.build(&logs);
        let rbi = &report.compliance_mappings["RBI-IT-Framework"];
        assert_eq!(rbi.total_controls, 2);
        assert_eq!(rbi.failed_controls, 1);
        assert!((rbi.compliance_percentage - 50.0).abs() < f64::EPSILON);

        let iso = &report.compliance_mappings["ISO27001"];
        assert_eq!((iso.total_controls, iso.failed_controls), (3, 2));

        assert_eq!(report.executive_summary.critical_findings, 1);
        assert_eq!(report.executive_summary.risk_level, RiskLevel::Medium);
        assert_eq!(report.detailed_findings[0].remediation_priority, RiskLevel::High);
        assert_eq!(report.remediation_summary["MEDIUM"], 1);
    }

    #[test]
    fn no_logs_means_full_score_and_low_risk() {
        let report = ComplianceReporter::new(&[Framework::Sebi]).build(&[]);
        assert_eq!(report.executive_summary.total_findings, 0);
        assert!((report.executive_summary.compliance_score - 100.0).abs() < f64::EPSILON);
        assert_eq!(report.compliance_mappings["SEBI-Guidelines"].total_controls, 1);
        assert_eq!(report.executive_summary.risk_level, RiskLevel::Low);
    }

    #[test]
    fn summary_frameworks_use_gate_keys() {
        let reporter = ComplianceReporter::new(&[Framework::Rbi]);
        let report = reporter.build(&[(PathBuf::from("a.sarif"), sarif(&[("payment-data-exposure", "error")]))]);
        let summary = ComplianceReporter::summary(&report);
        assert_eq!(summary.frameworks["rbi"].score, 0.0);
        assert!(summary.compliance_scores.contains_key("RBI-IT-Framework"));
    }

    #[test]
    fn markdown_has_no_unfilled_default_placeholders() {
        let reporter = ComplianceReporter::new(&Framework::ALL);
        let report = reporter.build(&[(PathBuf::from("a.sarif"), sarif(&[("java/sql-injection", "error")]))]);
        let markdown = ComplianceReporter::render_markdown(&report, DEFAULT_REPORT_TEMPLATE);
        assert!(!markdown.contains("{{"));
        assert!(markdown.contains("| HIGH | java/sql-injection | RBI-IT-4.2.1, A.12.6.1, A.14.2.5 | m |"));
    }

    #[tokio::test]
    async fn generate_writes_three_files_even_for_empty_directory() {
        let sarif_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let out = output_dir.path().join("reports");

        let reporter = ComplianceReporter::new(&[Framework::Rbi]);
        let report = reporter.generate(sarif_dir.path(), &out, None).await.unwrap();

        for name in [REPORT_JSON_FILE, REPORT_SUMMARY_FILE, REPORT_MARKDOWN_FILE] {
            assert!(out.join(name).exists(), "{name}");
        }

        let written = std::fs::read_to_string(out.join(REPORT_JSON_FILE)).unwrap();
        let reloaded: ComplianceReport = serde_json::from_str(&written).unwrap();
        assert_eq!(reloaded.metadata.report_id, report.metadata.report_id);
    }
}
