use std::collections::BTreeMap;
use std::path::Path;
use crate::enums::gate_violation::GateViolation;
use crate::enums::severity::Severity;
use crate::errors::{GuardError, GuardResult};
use crate::services::sarif_reader::SarifReader;
use crate::structs::compliance::compliance_scores::ComplianceScores;
use crate::structs::config::gates_config::GatesConfig;
use crate::structs::gates::critical_rule_hit::CriticalRuleHit;
use crate::structs::gates::quality_gate_report::QualityGateReport;
use crate::structs::sarif::sarif_log::SarifLog;

/// Build-breaking policy over SARIF findings and compliance scores.
pub struct QualityGates {
    config: GatesConfig,
}

impl QualityGates {
    pub const fn new(config: GatesConfig) -> Self {
        Self { config }
    }

    /// Command line overrides on top of the configured gates.
    pub fn with_overrides(mut self, fail_on_critical: bool, fail_on_high: bool, max_medium: Option<usize>) -> Self {
        if let Some(gate) = self.config.severity_gate_mut(Severity::Critical) {
            gate.fail_build &= fail_on_critical;
        }
        if let Some(gate) = self.config.severity_gate_mut(Severity::High) {
            gate.fail_build &= fail_on_high;
        }
        if let (Some(max), Some(gate)) = (max_medium, self.config.severity_gate_mut(Severity::Medium)) {
            gate.max_allowed = max;
        }
        self
    }

    /// Counts results per severity and flags every gate whose maximum is exceeded.
    pub fn evaluate_findings(&self, logs: &[SarifLog]) -> (BTreeMap<String, usize>, Vec<GateViolation>) {
        let mut counts: BTreeMap<Severity, usize> = Severity::ALL.iter().map(|s| (*s, 0)).collect();

        for result in logs.iter().flat_map(|l| l.runs.iter()).flat_map(|r| r.results.iter()) {
            *counts.entry(Severity::from_sarif_level(result.level.as_deref())).or_insert(0) += 1;
        }

        let violations = counts
            .iter()
            .rev()
            .filter_map(|(severity, count)| {
                let gate = self.config.severity_gate(*severity)?;
                (*count > gate.max_allowed).then(|| GateViolation::SecurityFinding {
                    severity: *severity,
                    count: *count,
                    max_allowed: gate.max_allowed,
                    fail_build: gate.fail_build,
                    message: gate.message.clone(),
                })
            })
            .collect();

        let findings = counts.into_iter().map(|(s, c)| (s.as_str().to_string(), c)).collect();
        (findings, violations)
    }

    /// Frameworks without a configured gate never violate.
    pub fn evaluate_compliance_scores(&self, scores: &ComplianceScores) -> Vec<GateViolation> {
        scores
            .frameworks
            .iter()
            .filter_map(|(framework, entry)| {
                let gate = self.config.compliance.get(&framework.to_ascii_lowercase())?;
                (entry.score < gate.min_score).then(|| GateViolation::ComplianceScore {
                    framework: framework.clone(),
                    score: entry.score,
                    min_score: gate.min_score,
                    fail_build: gate.fail_build,
                    message: gate.message.clone(),
                })
            })
            .collect()
    }

    /// Any result touching a critical financial rule fails the build, reported
    /// as a single violation listing every hit.
    pub fn check_financial_rules(&self, logs: &[SarifLog]) -> Option<GateViolation> {
        let hits: Vec<CriticalRuleHit> = logs
            .iter()
            .flat_map(|l| l.runs.iter())
            .flat_map(|r| r.results.iter())
            .flat_map(|result| {
                let rule_id = result.rule_id.clone().unwrap_or_default();
                let rule_lower = rule_id.to_lowercase();
                self.config
                    .critical_rules
                    .iter()
                    .filter(move |critical| rule_lower.contains(critical.as_str()))
                    .map(move |critical| CriticalRuleHit {
                        rule: critical.clone(),
                        rule_id: rule_id.clone(),
                        message: result.message.text.clone(),
                        level: result.level.clone().unwrap_or_else(|| "note".to_string()),
                    })
            })
            .collect();

        if hits.is_empty() {
            return None;
        }

        log::warn!("🏦 {} critical financial rule hits", hits.len());
        Some(GateViolation::FinancialSecurityViolation {
            violations: hits,
            fail_build: true,
            message: "Critical financial security violations found".to_string(),
        })
    }

    pub fn evaluate(&self, logs: &[SarifLog], scores: Option<&ComplianceScores>) -> QualityGateReport {
        let (findings, mut violations) = self.evaluate_findings(logs);
        if let Some(scores) = scores {
            violations.extend(self.evaluate_compliance_scores(scores));
        }
        violations.extend(self.check_financial_rules(logs));

        QualityGateReport::from_violations(findings, violations)
    }

    pub async fn read_scores(path: &Path) -> GuardResult<ComplianceScores> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GuardError::file_error(&path.to_string_lossy(), "read", &e.to_string()))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// A score file that cannot be read or parsed is logged and ignored.
    pub async fn load_scores(path: &Path) -> Option<ComplianceScores> {
        match Self::read_scores(path).await {
            Ok(scores) => Some(scores),
            Err(e) => {
                log::warn!("⚠️ Ignoring compliance file {}: {}", path.display(), e);
                None
            }
        }
    }

    pub async fn run(&self, sarif_dir: &Path, compliance_file: Option<&Path>) -> GuardResult<QualityGateReport> {
        let logs: Vec<SarifLog> = SarifReader::read_dir(sarif_dir).await?.into_iter().map(|(_, l)| l).collect();
        let scores = match compliance_file {
            Some(path) if path.exists() => Self::load_scores(path).await,
            Some(path) => {
                log::warn!("⚠️ Compliance file {} does not exist", path.display());
                None
            }
            None => None,
        };
        Ok(self.evaluate(&logs, scores.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::gate_status::GateStatus;
    use crate::structs::compliance::compliance_scores::ScoreEntry;

    fn sarif(results: &[(&str, &str)]) -> SarifLog {
        let results: Vec<_> = results
            .iter()
            .map(|(rule, level)| serde_json::json!({"ruleId": rule, "level": level, "message": {"text": "m"}}))
            .collect();
        serde_json::from_value(serde_json::json!({"version": "2.1.0", "runs": [{"results": results}]})).unwrap()
    }

    fn scores(entries: &[(&str, f64)]) -> ComplianceScores {
        ComplianceScores {
            frameworks: entries.iter().map(|(k, s)| ((*k).to_string(), ScoreEntry { score: *s })).collect(),
        }
    }

    #[test]
    fn clean_logs_pass() {
        let gates = QualityGates::new(GatesConfig::default());
        let report = gates.evaluate(&[sarif(&[("js/unused", "note")])], None);
        assert_eq!(report.quality_gate_status, GateStatus::Pass);
        assert_eq!(report.build_decision, GateStatus::Pass);
        assert_eq!(report.findings_summary["medium"], 1);
    }

    #[test]
    fn medium_overflow_only_warns() {
        let gates = QualityGates::new(GatesConfig::default());
        let notes: Vec<_> = (0..6).map(|_| ("js/unused", "note")).collect();
        let report = gates.evaluate(&[sarif(&notes)], None);
        assert_eq!(report.quality_gate_status, GateStatus::Warning);
        assert_eq!(report.build_decision, GateStatus::Pass);
        assert_eq!(report.violations.len(), 1);
    }

    #[test]
    fn single_error_fails_build() {
        let gates = QualityGates::new(GatesConfig::default());
        let report = gates.evaluate(&[sarif(&[("java/sql-injection", "error")])], None);
        assert_eq!(report.quality_gate_status, GateStatus::Fail);
        assert_eq!(report.failing_violations(), 1);
    }

    #[test]
    fn overrides_relax_critical_and_medium() {
        let gates = QualityGates::new(GatesConfig::default()).with_overrides(false, true, Some(10));
        let mut entries = vec![("java/sql-injection", "error")];
        entries.extend((0..8).map(|_| ("js/unused", "note")));
        let report = gates.evaluate(&[sarif(&entries)], None);
        assert_eq!(report.quality_gate_status, GateStatus::Warning);
        assert_eq!(report.violations.len(), 1);
    }

    #[test]
    fn compliance_scores_below_minimum_violate() {
        let gates = QualityGates::new(GatesConfig::default());
        let violations = gates.evaluate_compliance_scores(&scores(&[("rbi", 89.0), ("iso27001", 70.0), ("pci", 10.0)]));
        assert_eq!(violations.len(), 2);
        assert!(violations[1].fail_build());
        assert!(!violations[0].fail_build());
    }

    #[test]
    fn critical_financial_rules_are_collected_into_one_violation() {
        let gates = QualityGates::new(GatesConfig::default());
        let logs = [sarif(&[
            ("bfsi/payment-data-exposure", "note"),
            ("custom/PII-Exposure-logging", "note"),
            ("js/unused", "note"),
        ])];
        match gates.check_financial_rules(&logs) {
            Some(GateViolation::FinancialSecurityViolation { violations, fail_build, .. }) => {
                assert!(fail_build);
                assert_eq!(violations.len(), 2);
                assert_eq!(violations[1].rule, "pii-exposure");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(gates.evaluate(&logs, None).quality_gate_status, GateStatus::Fail);
    }
}
