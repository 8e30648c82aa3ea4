use crate::errors::GuardResult;
use crate::structs::source::scan_report::ScanReport;
use crate::traits::finding_renderer::FindingRenderer;

pub struct JsonRenderer;

impl FindingRenderer for JsonRenderer {
    fn render(&self, report: &ScanReport) -> GuardResult<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
