use crate::errors::GuardResult;
use crate::structs::source::scan_report::ScanReport;

/// Turns a finished scan into one output document.
pub trait FindingRenderer: Send + Sync {
    fn render(&self, report: &ScanReport) -> GuardResult<String>;

    /// File extension used when the rendered document is written to disk.
    fn extension(&self) -> &'static str;
}
