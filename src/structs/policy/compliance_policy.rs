use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Dependency approval tables. Every `name` is a `%` glob.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompliancePolicy {
    #[serde(default)]
    pub policy_version: Option<String>,
    #[serde(default)]
    pub approved_dependencies: Vec<ApprovedDependency>,
    #[serde(default)]
    pub prohibited_dependencies: Vec<ProhibitedDependency>,
    #[serde(default)]
    pub conditional_approvals: Vec<ConditionalApproval>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovedDependency {
    pub name: String,
    #[serde(default)]
    pub min_version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProhibitedDependency {
    pub name: String,
    pub reason: String,
    /// Only versions strictly below this one are prohibited.
    #[serde(default)]
    pub below_version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionalApproval {
    pub name: String,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub expires: Option<NaiveDate>,
}
