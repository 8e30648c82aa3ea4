use crate::enums::gate_violation::GateViolation;
use crate::enums::rule_category::RuleCategory;
use crate::services::rule_catalog::RuleCatalog;
use crate::structs::compliance::compliance_report::ComplianceReport;
use crate::structs::compliance::sarif_processing_report::SarifProcessingReport;
use crate::structs::gates::quality_gate_report::QualityGateReport;
use crate::structs::policy::policy_report::PolicyReport;
use crate::structs::rules::match_result::MatchResult;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Console summaries for each command. Machine-readable output goes to files.
pub struct ReportPrinter;

impl ReportPrinter {
    pub fn print_rules(catalog: &RuleCatalog, category: Option<RuleCategory>) {
        println!("📋 PATTERN RULES");
        println!("{RULE}");
        for set in catalog.rule_sets().iter().filter(|s| category.map_or(true, |c| s.category == c)) {
            println!("\n📦 {} ({})", set.name, set.category);
            for rule in &set.rules {
                println!("  {} {} [{}] {}", rule.severity.emoji(), rule.id, rule.compliance_tag, rule.message);
                let patterns: Vec<&str> = rule.patterns.iter().map(|p| p.raw()).collect();
                println!("      patterns: {}", patterns.join(", "));
                if !rule.allow_patterns.is_empty() {
                    let allowed: Vec<&str> = rule.allow_patterns.iter().map(|p| p.raw()).collect();
                    println!("      allowed:  {}", allowed.join(", "));
                }
            }
        }

        let totals: Vec<String> = RuleCategory::ALL
            .iter()
            .filter(|c| category.map_or(true, |wanted| wanted == **c))
            .map(|c| {
                let count: usize = catalog
                    .rule_sets()
                    .iter()
                    .filter(|s| s.category == *c)
                    .map(|s| s.rules.len())
                    .sum();
                format!("{c}: {count}")
            })
            .collect();
        println!("\n📊 Rules per category: {}", totals.join(", "));
        println!("{RULE}");
    }

    pub fn print_matches(text: &str, matches: &[MatchResult]) {
        if matches.is_empty() {
            println!("✅ '{text}' matches no rule");
            return;
        }
        println!("🔍 '{text}' matches {} rule(s):", matches.len());
        for m in matches {
            println!(
                "  {} {} [{}] '{}' via {} ({})",
                m.severity.emoji(),
                m.rule_id,
                m.category,
                m.matched_text,
                m.matched_pattern,
                m.compliance_tag
            );
        }
    }

    pub fn print_processing_summary(report: &SarifProcessingReport, output: &str) {
        println!("📝 Compliance report generated: {output}");
        println!("📊 Total findings: {}", report.summary.total_findings);
        let severities: Vec<String> = report
            .summary
            .by_severity
            .iter()
            .map(|(severity, count)| format!("{severity}: {count}"))
            .collect();
        println!("   {}", severities.join(", "));
        println!("🏛️ Compliance status: {}", report.summary.compliance_status.as_str());
    }

    pub fn print_gate_report(report: &QualityGateReport) {
        println!("🚦 QUALITY GATE EVALUATION");
        println!("{RULE}");
        println!("Status: {}", report.quality_gate_status.as_str());
        println!("Build Decision: {}", report.build_decision.as_str());
        println!("Total Findings: {}", report.total_findings());
        println!("Total Violations: {}", report.violations.len());

        if !report.violations.is_empty() {
            println!("\nViolations:");
            for (i, violation) in report.violations.iter().enumerate() {
                println!("{}. {}", i + 1, violation.message());
                if let GateViolation::FinancialSecurityViolation { violations, .. } = violation {
                    for hit in violations {
                        println!("   🏦 {} ({}): {}", hit.rule_id, hit.level, hit.message);
                    }
                }
                if violation.fail_build() {
                    println!("   ❌ FAILS BUILD");
                } else {
                    println!("   ⚠️ WARNING");
                }
            }
        }

        let failing = report.failing_violations();
        if failing > 0 {
            println!("\n❌ BUILD FAILED: {failing} quality gate violations");
        } else if !report.violations.is_empty() {
            println!("\n⚠️ BUILD PASSED WITH WARNINGS: {} issues to address", report.violations.len());
        } else {
            println!("\n✅ BUILD PASSED: All quality gates satisfied");
        }
    }

    pub fn print_compliance_report(report: &ComplianceReport) {
        let summary = &report.executive_summary;
        println!("🏛️ COMPLIANCE REPORT {}", report.metadata.report_id);
        println!("{RULE}");
        println!("Findings: {} ({} critical)", summary.total_findings, summary.critical_findings);
        println!("Compliance score: {:.1}%", summary.compliance_score);
        println!("Risk level: {}", summary.risk_level.as_str());
        for (standard, data) in &report.compliance_mappings {
            println!(
                "  📘 {standard}: {:.1}% ({} of {} controls failed)",
                data.compliance_percentage, data.failed_controls, data.total_controls
            );
        }
    }

    pub fn print_policy_report(report: &PolicyReport) {
        println!("📦 DEPENDENCY POLICY CHECK");
        println!("{RULE}");
        for check in &report.results {
            println!("  {} {} {}", check.verdict.emoji(), check.dependency, check.verdict.label());
        }
        println!("{RULE}");
        if report.passed() {
            println!("✅ {} dependencies checked, no violations", report.results.len());
        } else {
            println!("❌ {} policy violations in {} dependencies", report.violations, report.results.len());
        }
    }
}
