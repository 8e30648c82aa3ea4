use crate::enums::framework::Framework;
use crate::enums::severity::Severity;
use crate::structs::compliance::control_mapping::ControlMapping;

struct ControlDefinition {
    framework: Framework,
    control: &'static str,
    description: &'static str,
    terms: &'static [&'static str],
}

const fn control(
    framework: Framework,
    control: &'static str,
    description: &'static str,
    terms: &'static [&'static str],
) -> ControlDefinition {
    ControlDefinition { framework, control, description, terms }
}

const CONTROLS: &[ControlDefinition] = &[
    control(Framework::Rbi, "RBI-IT-4.2.1", "Application Security - Secure coding practices", &["sql-injection", "xss", "injection"]),
    control(Framework::Rbi, "RBI-IT-4.3.2", "Cryptographic Controls", &["weak-cryptographic-algorithm", "crypto", "encryption", "cipher"]),
    control(Framework::Rbi, "RBI-IT-4.1.3", "Access Control and Authentication", &["hardcoded-credentials", "auth", "session", "access"]),
    control(Framework::Rbi, "RBI-IT-4.3.1", "Sensitive Data Handling", &["sensitive-data-exposure"]),
    control(Framework::Rbi, "RBI-IT-4.3.3", "Customer Data Protection", &["payment-data-exposure", "pii", "personal", "data-protection"]),
    control(Framework::Rbi, "RBI-DL-1.1", "Storage of Payment System Data in India", &["localization", "localisation"]),
    control(Framework::Iso27001, "A.12.6.1", "Management of technical vulnerabilities", &["sql-injection", "xss", "vulnerability"]),
    control(Framework::Iso27001, "A.14.2.5", "Secure system engineering principles", &["sql-injection", "injection"]),
    control(Framework::Iso27001, "A.10.1.1", "Policy on the use of cryptographic controls", &["weak-cryptographic-algorithm", "crypto", "encryption", "cipher", "hash"]),
    control(Framework::Iso27001, "A.9.4.3", "Password management system", &["hardcoded-credentials", "password"]),
    control(Framework::Iso27001, "A.9.1.1", "Access control policy", &["auth", "access", "authorization"]),
    control(Framework::Iso27001, "A.18.1.4", "Privacy and protection of personally identifiable information", &["pii", "personal", "payment-data", "localization"]),
    control(Framework::Sebi, "SEBI-SG-2.1", "System Governance and Risk Management", &["governance", "policy", "procedure", "risk-management"]),
    control(Framework::Sebi, "SEBI-DI-3.1", "Data Integrity and Validation", &["data-integrity", "validation", "consistency"]),
    control(Framework::Sebi, "SEBI-AT-4.1", "Audit Trail", &["audit-trail", "audit-log", "logging"]),
];

/// Maps scanner rule ids onto regulatory controls by substring terms.
pub struct ComplianceMapper {
    frameworks: Vec<Framework>,
}

impl ComplianceMapper {
    pub fn new(frameworks: &[Framework]) -> Self {
        Self {
            frameworks: frameworks.to_vec(),
        }
    }

    pub fn all() -> Self {
        Self::new(&Framework::ALL)
    }

    /// Every control whose term list hits the lower-cased rule id, in table order.
    pub fn map(&self, rule_id: &str, severity: Severity) -> Vec<ControlMapping> {
        let rule_lower = rule_id.to_lowercase();

        CONTROLS
            .iter()
            .filter(|definition| self.frameworks.contains(&definition.framework))
            .filter(|definition| definition.terms.iter().any(|term| rule_lower.contains(term)))
            .map(|definition| ControlMapping {
                framework: definition.framework,
                control: definition.control.to_string(),
                description: definition.description.to_string(),
                category: definition.framework.category().to_string(),
                severity_impact: severity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls(mappings: &[ControlMapping]) -> Vec<&str> {
        mappings.iter().map(|m| m.control.as_str()).collect()
    }

    #[test]
    fn codeql_sql_injection_maps_to_rbi_and_iso() {
        let mappings = ComplianceMapper::all().map("java/sql-injection", Severity::Critical);
        assert_eq!(controls(&mappings), vec!["RBI-IT-4.2.1", "A.12.6.1", "A.14.2.5"]);
        assert!(mappings.iter().all(|m| m.severity_impact == Severity::Critical));
    }

    #[test]
    fn payment_rule_maps_to_customer_data_protection() {
        let mappings = ComplianceMapper::all().map("payment-data-exposure", Severity::Critical);
        assert_eq!(controls(&mappings), vec!["RBI-IT-4.3.3", "A.18.1.4"]);
    }

    #[test]
    fn frameworks_not_selected_are_left_out() {
        let mapper = ComplianceMapper::new(&[Framework::Sebi]);
        assert!(mapper.map("java/weak-cryptographic-algorithm", Severity::High).is_empty());
        assert_eq!(controls(&mapper.map("missing-audit-trail", Severity::Low)), vec!["SEBI-AT-4.1"]);
    }

    #[test]
    fn unknown_rule_maps_to_nothing() {
        assert!(ComplianceMapper::all().map("js/unused-local-variable", Severity::Low).is_empty());
    }
}
