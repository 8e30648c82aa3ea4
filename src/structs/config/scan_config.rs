use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScanConfig {
    #[serde(default = "ConfigHelper::default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    #[serde(default = "ConfigHelper::default_max_file_size")]
    pub max_file_size: String,

    #[serde(default = "ConfigHelper::default_respect_gitignore")]
    pub respect_gitignore: bool,

    #[serde(default)]
    pub skip_tests: bool,

    /// Empty means every supported extension.
    #[serde(default)]
    pub file_extensions: Vec<String>,
}

impl ScanConfig {
    pub fn max_file_size_bytes(&self) -> u64 {
        ConfigHelper::parse_size(&self.max_file_size).unwrap_or(crate::config::constants::DEFAULT_MAX_FILE_SIZE_BYTES)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude_patterns: ConfigHelper::default_exclude_patterns(),
            max_file_size: ConfigHelper::default_max_file_size(),
            respect_gitignore: ConfigHelper::default_respect_gitignore(),
            skip_tests: false,
            file_extensions: vec![],
        }
    }
}
