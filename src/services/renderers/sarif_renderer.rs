use std::sync::Arc;
use crate::errors::GuardResult;
use crate::services::rule_catalog::RuleCatalog;
use crate::services::sarif_writer::SarifWriter;
use crate::structs::source::scan_report::ScanReport;
use crate::traits::finding_renderer::FindingRenderer;

pub struct SarifRenderer {
    catalog: Arc<RuleCatalog>,
}

impl SarifRenderer {
    pub const fn new(catalog: Arc<RuleCatalog>) -> Self {
        Self { catalog }
    }
}

impl FindingRenderer for SarifRenderer {
    fn render(&self, report: &ScanReport) -> GuardResult<String> {
        let log = SarifWriter::from_report(report, &self.catalog);
        Ok(serde_json::to_string_pretty(&log)?)
    }

    fn extension(&self) -> &'static str {
        crate::config::constants::SARIF_EXTENSION
    }
}
