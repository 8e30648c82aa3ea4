use std::collections::BTreeMap;
use crate::config::constants::CRITICAL_FINANCIAL_RULES;
use crate::structs::config::gates_config::{ComplianceGate, SeverityGate};

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_exclude_patterns() -> Vec<String> {
        vec![
            "target/".to_string(),
            "node_modules/".to_string(),
            "dist/".to_string(),
            "build/".to_string(),
            ".git/".to_string(),
            "*.lock".to_string(),
            "*.min.js".to_string(),
        ]
    }

    pub fn default_max_file_size() -> String {
        "1MB".to_string()
    }

    pub const fn default_respect_gitignore() -> bool {
        true
    }

    pub const fn default_include_builtin() -> bool {
        true
    }

    pub fn default_critical_rules() -> Vec<String> {
        CRITICAL_FINANCIAL_RULES.iter().map(ToString::to_string).collect()
    }

    pub fn default_severity_gates() -> BTreeMap<String, SeverityGate> {
        let gate = |max_allowed, fail_build, message: &str| SeverityGate {
            max_allowed,
            fail_build,
            message: message.to_string(),
        };

        BTreeMap::from([
            ("critical".to_string(), gate(0, true, "Critical security vulnerabilities must be resolved before deployment")),
            ("high".to_string(), gate(0, true, "High severity security issues must be addressed")),
            ("medium".to_string(), gate(5, false, "Medium severity issues should be reviewed and scheduled for remediation")),
            ("low".to_string(), gate(20, false, "Low severity issues should be tracked for future remediation")),
        ])
    }

    pub fn default_compliance_gates() -> BTreeMap<String, ComplianceGate> {
        let gate = |min_score, fail_build, message: &str| ComplianceGate {
            min_score,
            fail_build,
            message: message.to_string(),
        };

        BTreeMap::from([
            ("rbi".to_string(), gate(90.0, true, "RBI IT Framework compliance score below minimum threshold")),
            ("sebi".to_string(), gate(85.0, true, "SEBI Guidelines compliance score below minimum threshold")),
            ("iso27001".to_string(), gate(80.0, false, "ISO 27001 compliance score below target")),
        ])
    }

    /// Parses sizes such as `500KB`, `1MB` or a bare byte count.
    pub fn parse_size(size: &str) -> Option<u64> {
        let size = size.trim().to_ascii_uppercase();
        let (digits, multiplier) = if let Some(n) = size.strip_suffix("GB") {
            (n, 1024 * 1024 * 1024)
        } else if let Some(n) = size.strip_suffix("MB") {
            (n, 1024 * 1024)
        } else if let Some(n) = size.strip_suffix("KB") {
            (n, 1024)
        } else if let Some(n) = size.strip_suffix('B') {
            (n, 1)
        } else {
            (size.as_str(), 1)
        };
        digits.trim().parse::<u64>().ok().map(|n| n * multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_human_sizes() {
        assert_eq!(ConfigHelper::parse_size("1MB"), Some(1024 * 1024));
        assert_eq!(ConfigHelper::parse_size("500kb"), Some(500 * 1024));
        assert_eq!(ConfigHelper::parse_size("2048"), Some(2048));
        assert_eq!(ConfigHelper::parse_size("lots"), None);
    }

    #[test]
    fn default_gates_fail_on_critical_and_high_only() {
        let gates = ConfigHelper::default_severity_gates();
        assert!(gates["critical"].fail_build);
        assert!(gates["high"].fail_build);
        assert!(!gates["medium"].fail_build);
        assert_eq!(gates["medium"].max_allowed, 5);
        assert_eq!(gates["low"].max_allowed, 20);
    }
}
