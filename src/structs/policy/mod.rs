pub mod compliance_policy;
pub mod dependency;
pub mod policy_report;
pub mod suppression;
