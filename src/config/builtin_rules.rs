use once_cell::sync::Lazy;
use crate::enums::rule_category::RuleCategory;
use crate::enums::severity::Severity;
use crate::structs::config::pattern_rule::PatternRuleConfig;
use crate::structs::config::rules_config::RuleSetConfig;

fn rule(id: &str, severity: Severity, tag: &str, message: &str, patterns: &[&str], allow: &[&str]) -> PatternRuleConfig {
    PatternRuleConfig {
        id: id.to_string(),
        patterns: patterns.iter().map(ToString::to_string).collect(),
        allow_patterns: allow.iter().map(ToString::to_string).collect(),
        severity,
        compliance_tag: tag.to_string(),
        message: message.to_string(),
    }
}

fn set(name: &str, category: RuleCategory, rules: Vec<PatternRuleConfig>) -> RuleSetConfig {
    RuleSetConfig {
        name: name.to_string(),
        category,
        rules,
    }
}

pub static BUILTIN_RULE_SETS: Lazy<Vec<RuleSetConfig>> = Lazy::new(|| {
    vec![
        set("payment", RuleCategory::Payment, vec![rule(
            "payment-data-exposure",
            Severity::Critical,
            "PCI-DSS-3.4",
            "Payment card data handled in application code",
            &[
                "%card%number%",
                "%cardno%",
                "%pannumber%",
                "%cvv%",
                "%cvc%",
                "%card%expiry%",
                "%expiry%date%",
                "%atm%pin%",
                "%card%pin%",
                "%upi%pin%",
                "%account%number%",
                "%acct%no%",
                "%ifsc%",
                "%iban%",
                "%routing%number%",
            ],
            &[],
        )]),
        set("pii", RuleCategory::Pii, vec![rule(
            "pii-exposure",
            Severity::High,
            "RBI-IT-4.3.3",
            "Personally identifiable customer data handled in application code",
            &[
                "%aadhaar%",
                "%aadhar%",
                "%pancard%",
                "%passport%",
                "%voter%id%",
                "%date%of%birth%",
                "%dob",
                "%email%",
                "%phone%",
                "%mobile%number%",
                "%customer%name%",
                "%full%name%",
                "%mother%maiden%",
                "%home%address%",
            ],
            &[],
        )]),
        set("encryption", RuleCategory::Encryption, vec![
            rule(
                "weak-transaction-encryption",
                Severity::Critical,
                "RBI-IT-4.3.2",
                "Broken cipher used for financial data",
                &["des", "desede", "tripledes", "3des", "rc2", "rc4", "arcfour", "blowfish"],
                &[],
            ),
            rule(
                "weak-cipher-mode",
                Severity::High,
                "RBI-IT-4.3.2",
                "ECB mode leaks plaintext structure",
                &["ecb"],
                &[],
            ),
            rule(
                "weak-hash-algorithm",
                Severity::Medium,
                "ISO27001-A.10.1.1",
                "Collision-prone hash algorithm",
                &["md2", "md4", "md5", "sha1", "hmacmd5", "hmacsha1"],
                &[],
            ),
        ]),
        set("localization", RuleCategory::Localization, vec![rule(
            "rbi-data-localization",
            Severity::High,
            "RBI-DL-2018",
            "Payment system data must be stored in Indian regions",
            &[
                // Cloud region codes carry a digit suffix, which keeps words like
                // `leastUsed` clear once separators are stripped.
                "%us-east-1%", "%us-east-2%", "%us-west-1%", "%us-west-2%",
                "%us-gov-east-1%", "%us-gov-west-1%", "%ca-central-1%", "%ca-west-1%",
                "%eu-west-1%", "%eu-west-2%", "%eu-west-3%", "%eu-central-1%",
                "%eu-central-2%", "%eu-north-1%", "%eu-south-1%", "%eu-south-2%",
                "%ap-southeast-1%", "%ap-southeast-2%", "%ap-southeast-3%", "%ap-southeast-4%",
                "%ap-northeast-1%", "%ap-northeast-2%", "%ap-northeast-3%", "%ap-east-1%",
                "%sa-east-1%", "%me-south-1%", "%me-central-1%", "%af-south-1%",
                // Azure names: the bare value, or a host label such as `x.eastus.cloudapp.azure.com`.
                "eastus", "eastus2", "westus", "westus2", "westus3",
                "centralus", "westeurope", "northeurope", "southeastasia",
                "%.eastus.%", "%.eastus2.%", "%.westus.%", "%.westus2.%", "%.westus3.%",
                "%.centralus.%", "%.westeurope.%", "%.northeurope.%", "%.southeastasia.%",
            ],
            &["%ap-south-1%", "%ap-south-2%", "%centralindia%", "%southindia%", "%westindia%", "%asia-south1%", "%asia-south2%"],
        )]),
    ]
});
