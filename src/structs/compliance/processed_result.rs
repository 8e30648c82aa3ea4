use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::enums::severity::Severity;
use crate::structs::compliance::control_mapping::ControlMapping;
use crate::structs::sarif::sarif_log::SarifLocation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedResult {
    pub rule_id: String,
    pub message: String,
    pub level: String,
    pub severity: Severity,
    pub compliance_mappings: Vec<ControlMapping>,
    pub locations: Vec<ResultLocation>,
    pub fingerprints: BTreeMap<String, String>,
    pub processed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultLocation {
    pub file: String,
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl From<&SarifLocation> for ResultLocation {
    fn from(location: &SarifLocation) -> Self {
        let Some(physical) = &location.physical_location else {
            return Self::default();
        };
        let region = physical.region.clone().unwrap_or_default();
        Self {
            file: physical
                .artifact_location
                .as_ref()
                .map(|a| a.uri.clone())
                .unwrap_or_default(),
            start_line: region.start_line.unwrap_or(0),
            start_column: region.start_column.unwrap_or(0),
            end_line: region.end_line.unwrap_or(0),
            end_column: region.end_column.unwrap_or(0),
        }
    }
}
