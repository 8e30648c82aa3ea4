pub const CONFIG_DIR_NAME: &str = "bfsi-guard";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOCAL_CONFIG_FILE: &str = "bfsi-guard.toml";

pub const DEFAULT_COMPLIANCE_REPORT_FILE: &str = "compliance-report.json";
pub const DEFAULT_GATE_REPORT_FILE: &str = "quality-gate-report.json";
pub const REPORT_JSON_FILE: &str = "compliance-report.json";
pub const REPORT_SUMMARY_FILE: &str = "compliance-summary.json";
pub const REPORT_MARKDOWN_FILE: &str = "compliance-report.md";

pub const PROCESSOR_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const TOOL_NAME: &str = "bfsi-guard";

pub const SARIF_VERSION: &str = "2.1.0";
pub const SARIF_SCHEMA: &str = "https://json.schemastore.org/sarif-2.1.0.json";
pub const SARIF_EXTENSION: &str = "sarif";

pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 1024 * 1024;

/// Glob wildcard understood by pattern rules.
pub const GLOB_WILDCARD: char = '%';

/// Rule ids whose presence in any result fails the build.
pub const CRITICAL_FINANCIAL_RULES: &[&str] = &[
    "payment-data-exposure",
    "weak-transaction-encryption",
    "pii-exposure",
    "rbi-data-localization",
];

/// Extension to language, and the line comment marker used by that language.
pub const SUPPORTED_FILE_EXTENSIONS: &[(&str, &str, &str)] = &[
    ("java", "java", "//"),
    ("kt", "kotlin", "//"),
    ("scala", "scala", "//"),
    ("rs", "rust", "//"),
    ("js", "javascript", "//"),
    ("jsx", "javascript", "//"),
    ("ts", "typescript", "//"),
    ("tsx", "typescript", "//"),
    ("go", "go", "//"),
    ("cs", "csharp", "//"),
    ("c", "c", "//"),
    ("h", "c", "//"),
    ("cpp", "cpp", "//"),
    ("php", "php", "//"),
    ("swift", "swift", "//"),
    ("py", "python", "#"),
    ("rb", "ruby", "#"),
    ("sh", "shell", "#"),
    ("yaml", "yaml", "#"),
    ("yml", "yaml", "#"),
    ("toml", "toml", "#"),
    ("properties", "properties", "#"),
];

pub const DEFAULT_REPORT_TEMPLATE: &str = r"# BFSI Compliance Report

**Generated:** {{generated_at}}
**Report ID:** {{report_id}}
**Standards:** {{standards}}

## Executive Summary

| Metric | Value |
|---|---|
| Total findings | {{total_findings}} |
| Critical findings | {{critical_findings}} |
| Compliance score | {{compliance_score}}% |
| Risk level | {{risk_level}} |

## Framework Compliance

{{framework_table}}

## Findings Requiring Remediation

{{remediation_table}}
";
