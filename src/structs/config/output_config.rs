use serde::{Deserialize, Serialize};
use crate::enums::output_format::OutputFormat;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default)]
    pub report_template: Option<String>,
}
