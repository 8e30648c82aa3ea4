use std::fmt::Write;
use crate::enums::severity::Severity;
use crate::errors::GuardResult;
use crate::structs::source::scan_report::ScanReport;
use crate::traits::finding_renderer::FindingRenderer;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Terminal report, findings grouped by severity, most severe first.
pub struct TextRenderer;

impl FindingRenderer for TextRenderer {
    fn render(&self, report: &ScanReport) -> GuardResult<String> {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "🔍 BFSI PATTERN SCAN REPORT");
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(
            out,
            "📁 {} | {} files scanned, {} skipped, {} suppressed",
            report.root, report.files_scanned, report.files_skipped, report.suppressed_findings
        );

        if report.findings.is_empty() {
            let _ = writeln!(out, "\n✅ No findings");
            let _ = writeln!(out, "{RULE}");
            return Ok(out);
        }

        for severity in Severity::ALL {
            let findings: Vec<_> = report.findings.iter().filter(|f| f.severity == severity).collect();
            if findings.is_empty() {
                continue;
            }

            let _ = writeln!(out, "\n{} {} ({})", severity.emoji(), severity.as_str().to_uppercase(), findings.len());
            for finding in findings {
                let location = finding
                    .source_location
                    .as_ref()
                    .map_or_else(|| "<input>".to_string(), ToString::to_string);
                let _ = writeln!(out, "  {location} [{}] {}", finding.rule_id, finding.message);
                let _ = writeln!(
                    out,
                    "      '{}' matched {} ({})",
                    finding.matched_text, finding.matched_pattern, finding.compliance_tag
                );
            }
        }

        let _ = writeln!(out, "\n{RULE}");
        let totals: Vec<String> = report
            .summary
            .by_severity
            .iter()
            .rev()
            .map(|(severity, count)| format!("{severity}: {count}"))
            .collect();
        let _ = writeln!(out, "📊 {} findings ({})", report.summary.total_findings, totals.join(", "));
        Ok(out)
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::services::pattern_evaluator::PatternEvaluator;
    use crate::services::rule_catalog::RuleCatalog;

    #[test]
    fn critical_findings_are_listed_before_high() {
        let (catalog, _) = RuleCatalog::builtin();
        let evaluator = PatternEvaluator::new(Arc::new(catalog));
        let mut findings = evaluator.evaluate("customerEmail", None);
        findings.extend(evaluator.evaluate("cardNumber", None));
        let report = ScanReport::new("repo", findings, 1, 0, 0);

        let text = TextRenderer.render(&report).unwrap();
        let critical = text.find("CRITICAL (1)").unwrap();
        let high = text.find("HIGH (1)").unwrap();
        assert!(critical < high);
        assert!(text.contains("<input> [pii-exposure]"));
        assert!(text.contains("📊 2 findings (critical: 1, high: 1)"));
    }

    #[test]
    fn clean_report_says_so() {
        let text = TextRenderer.render(&ScanReport::new("repo", vec![], 0, 0, 0)).unwrap();
        assert!(text.contains("No findings"));
    }
}
