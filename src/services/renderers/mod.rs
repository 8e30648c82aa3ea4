pub mod text_renderer;
pub mod json_renderer;
pub mod sarif_renderer;

use std::sync::Arc;
use crate::enums::output_format::OutputFormat;
use crate::services::rule_catalog::RuleCatalog;
use crate::traits::finding_renderer::FindingRenderer;
use json_renderer::JsonRenderer;
use sarif_renderer::SarifRenderer;
use text_renderer::TextRenderer;

pub fn renderer_for(format: OutputFormat, catalog: Arc<RuleCatalog>) -> Box<dyn FindingRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
        OutputFormat::Sarif => Box::new(SarifRenderer::new(catalog)),
    }
}
