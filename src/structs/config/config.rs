use serde::{Deserialize, Serialize};
use crate::structs::config::gates_config::GatesConfig;
use crate::structs::config::output_config::OutputConfig;
use crate::structs::config::rules_config::RulesConfig;
use crate::structs::config::scan_config::ScanConfig;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub gates: GatesConfig,

    #[serde(default)]
    pub output: OutputConfig,
}
