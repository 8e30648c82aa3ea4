use std::collections::BTreeMap;
use serde_json::json;
use crate::config::constants::{PROCESSOR_VERSION, SARIF_SCHEMA, SARIF_VERSION, TOOL_NAME};
use crate::services::rule_catalog::RuleCatalog;
use crate::structs::rules::match_result::MatchResult;
use crate::structs::sarif::sarif_log::{
    SarifArtifactLocation, SarifAutomationDetails, SarifConfiguration, SarifDriver, SarifLocation, SarifLog,
    SarifMessage, SarifPhysicalLocation, SarifRegion, SarifReportingDescriptor, SarifResult, SarifRun, SarifTool,
};
use crate::structs::source::scan_report::ScanReport;

/// Builds a SARIF 2.1.0 log from scan findings so the output can be fed back
/// into `process-sarif`, `gate` and code scanning dashboards.
pub struct SarifWriter;

impl SarifWriter {
    pub fn from_report(report: &ScanReport, catalog: &RuleCatalog) -> SarifLog {
        let rules = catalog
            .rules()
            .map(|rule| SarifReportingDescriptor {
                id: rule.id.clone(),
                short_description: Some(SarifMessage {
                    text: rule.message.clone(),
                }),
                default_configuration: Some(SarifConfiguration {
                    level: rule.severity.sarif_level().to_string(),
                }),
                properties: BTreeMap::from([
                    ("category".to_string(), json!(rule.category.as_str())),
                    ("compliance".to_string(), json!(rule.compliance_tag)),
                    ("security-severity".to_string(), json!(rule.severity.as_str())),
                ]),
            })
            .collect();

        let results = report.findings.iter().map(Self::result_for).collect();

        SarifLog {
            schema: Some(SARIF_SCHEMA.to_string()),
            version: SARIF_VERSION.to_string(),
            runs: vec![SarifRun {
                tool: SarifTool {
                    driver: SarifDriver {
                        name: TOOL_NAME.to_string(),
                        version: Some(PROCESSOR_VERSION.to_string()),
                        rules,
                    },
                },
                results,
                automation_details: Some(SarifAutomationDetails {
                    id: Some(format!("{TOOL_NAME}/scan/")),
                    guid: Some(report.report_id.to_string()),
                }),
            }],
        }
    }

    fn result_for(finding: &MatchResult) -> SarifResult {
        let locations = finding
            .source_location
            .as_ref()
            .map(|location| {
                vec![SarifLocation {
                    physical_location: Some(SarifPhysicalLocation {
                        artifact_location: Some(SarifArtifactLocation {
                            uri: location.file.clone(),
                        }),
                        region: Some(SarifRegion {
                            start_line: Some(location.line),
                            start_column: Some(location.column),
                            end_line: None,
                            end_column: None,
                        }),
                    }),
                }]
            })
            .unwrap_or_default();

        let fingerprint = match &finding.source_location {
            Some(location) => format!("{}:{}:{}", finding.rule_id, location, finding.matched_text),
            None => format!("{}:{}", finding.rule_id, finding.matched_text),
        };

        SarifResult {
            rule_id: Some(finding.rule_id.clone()),
            level: Some(finding.severity.sarif_level().to_string()),
            message: SarifMessage {
                text: format!("{}: '{}' matched {}", finding.message, finding.matched_text, finding.matched_pattern),
            },
            locations,
            fingerprints: BTreeMap::new(),
            partial_fingerprints: BTreeMap::from([("primaryLocationLineHash".to_string(), fingerprint)]),
            properties: BTreeMap::from([
                ("category".to_string(), json!(finding.category.as_str())),
                ("compliance".to_string(), json!(finding.compliance_tag)),
                ("matchedPattern".to_string(), json!(finding.matched_pattern)),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::enums::severity::Severity;
    use crate::services::pattern_evaluator::PatternEvaluator;
    use crate::services::sarif_reader::SarifReader;
    use crate::structs::source::source_location::SourceLocation;

    #[test]
    fn scan_findings_become_sarif_results_with_levels() {
        let (catalog, _) = RuleCatalog::builtin();
        let catalog = Arc::new(catalog);
        let evaluator = PatternEvaluator::new(Arc::clone(&catalog));
        let findings: Vec<_> = evaluator
            .evaluate("cvvCode", None)
            .into_iter()
            .map(|f| f.at(SourceLocation { file: "src/Pay.java".to_string(), line: 4, column: 9 }))
            .collect();
        let report = ScanReport::new(".", findings, 1, 0, 0);

        let log = SarifWriter::from_report(&report, &catalog);
        let json = serde_json::to_string(&log).unwrap();
        let reparsed = SarifReader::parse(&json).unwrap();

        let run = &reparsed.runs[0];
        assert_eq!(reparsed.version, "2.1.0");
        assert_eq!(run.tool.driver.name, TOOL_NAME);
        assert_eq!(run.results.len(), 1);
        assert_eq!(run.results[0].level.as_deref(), Some(Severity::Critical.sarif_level()));
        assert!(json.contains("\"$schema\""));
        assert!(json.contains("\"startLine\":4"));
        assert!(run.tool.driver.rules.iter().any(|r| r.id == "rbi-data-localization"));
    }
}
