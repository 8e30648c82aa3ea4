use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, LOCAL_CONFIG_FILE};
use crate::enums::framework::Framework;
use crate::enums::severity::Severity;
use crate::errors::{GuardError, GuardResult};
use crate::helpers::config_helper::ConfigHelper;
use crate::services::rule_catalog::RuleCatalog;
use crate::structs::config::config::Config;
use crate::structs::validation_result::ValidationResult;

const SAMPLE_CONFIG: &str = r#"# bfsi-guard configuration
#
# Looked up in this order: --config <path>, ./bfsi-guard.toml,
# ~/bfsi-guard/config.toml. Every section is optional.

[rules]
# Load the built-in payment, pii, encryption and localization rule sets.
include_builtin = true

# Custom rule sets. A set named like a built-in one replaces it.
# Patterns use '%' as the wildcard and ignore case, '_', '-' and spaces.
[[rules.rule_sets]]
name = "insurance"
category = "pii"

[[rules.rule_sets.rules]]
id = "policyholder-data-exposure"
patterns = ["%policy%holder%", "%nominee%name%"]
severity = "high"
compliance_tag = "IRDAI-IS-7.2"
message = "Policyholder personal data handled in application code"

[scan]
exclude_patterns = ["target/", "node_modules/", "dist/", "build/", ".git/", "*.lock", "*.min.js"]
max_file_size = "1MB"
respect_gitignore = true
skip_tests = false
# Empty means every supported source extension.
file_extensions = []

[gates]
critical_rules = ["payment-data-exposure", "weak-transaction-encryption", "pii-exposure", "rbi-data-localization"]

[gates.severity.critical]
max_allowed = 0
fail_build = true
message = "Critical security vulnerabilities must be resolved before deployment"

[gates.severity.high]
max_allowed = 0
fail_build = true
message = "High severity security issues must be addressed"

[gates.severity.medium]
max_allowed = 5
fail_build = false
message = "Medium severity issues should be reviewed and scheduled for remediation"

[gates.severity.low]
max_allowed = 20
fail_build = false
message = "Low severity issues should be tracked for future remediation"

[gates.compliance.rbi]
min_score = 90.0
fail_build = true
message = "RBI IT Framework compliance score below minimum threshold"

[gates.compliance.sebi]
min_score = 85.0
fail_build = true
message = "SEBI Guidelines compliance score below minimum threshold"

[gates.compliance.iso27001]
min_score = 80.0
fail_build = false
message = "ISO 27001 compliance score below target"

[output]
# text, json or sarif
format = "text"
# report_template = "templates/compliance-report.md"
"#;

pub struct ConfigManager;

impl ConfigManager {
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Candidate files in lookup order.
    pub fn config_locations(explicit: Option<&Path>) -> Vec<PathBuf> {
        if let Some(path) = explicit {
            return vec![path.to_path_buf()];
        }
        let mut locations = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        locations.extend(Self::global_config_path());
        locations
    }

    /// An explicit path must exist; otherwise the first file found wins and
    /// built-in defaults apply when there is none.
    pub fn load(explicit: Option<&Path>) -> GuardResult<Config> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(GuardError::ConfigurationFileError {
                    path: path.to_string_lossy().to_string(),
                    reason: "file does not exist".to_string(),
                });
            }
        }

        for location in Self::config_locations(explicit) {
            if location.exists() {
                log::info!("📋 Loading config from: {}", location.display());
                return Self::load_file(&location);
            }
        }

        log::debug!("No configuration file found, using defaults");
        Ok(Config::default())
    }

    pub fn load_file(path: &Path) -> GuardResult<Config> {
        let content = fs::read_to_string(path).map_err(|e| GuardError::ConfigurationFileError {
            path: path.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&content).map_err(|e| GuardError::ConfigurationFileError {
            path: path.to_string_lossy().to_string(),
            reason: e.to_string(),
        })
    }

    pub fn parse(content: &str) -> GuardResult<Config> {
        Ok(toml::from_str(content)?)
    }

    pub const fn sample_config() -> &'static str {
        SAMPLE_CONFIG
    }

    pub fn create_sample_config(path: Option<&Path>, force: bool) -> GuardResult<PathBuf> {
        let target = path.map_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE), Path::to_path_buf);

        if target.exists() && !force {
            return Err(GuardError::file_error(
                &target.to_string_lossy(),
                "create config",
                "file already exists (use --force to overwrite)",
            ));
        }

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, Self::sample_config())?;
        log::info!("✅ Created sample config at: {}", target.display());
        Ok(target)
    }

    pub fn validate_config(config: &Config) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let (catalog, load_errors) = RuleCatalog::load(&config.rules);
        errors.extend(load_errors.iter().map(ToString::to_string));
        if catalog.is_empty() {
            errors.push("No rule sets loaded: enable include_builtin or define rules.rule_sets".to_string());
        }

        let mut names = HashSet::new();
        for set in &config.rules.rule_sets {
            if !names.insert(set.name.as_str()) {
                errors.push(format!("Duplicate rule set name: {}", set.name));
            }
        }

        let mut ids = HashSet::new();
        for rule in catalog.rules() {
            if !ids.insert(rule.id.as_str()) {
                warnings.push(format!("Rule id '{}' is defined by more than one rule set", rule.id));
            }
            if rule.compliance_tag.is_empty() {
                warnings.push(format!("Rule '{}' has no compliance_tag", rule.id));
            }
        }

        if ConfigHelper::parse_size(&config.scan.max_file_size).is_none() {
            errors.push(format!("Invalid scan.max_file_size: '{}'", config.scan.max_file_size));
        }

        for key in config.gates.severity.keys() {
            if key.parse::<Severity>().is_err() {
                errors.push(format!("Unknown severity gate '{key}'"));
            }
        }

        for (key, gate) in &config.gates.compliance {
            if key.parse::<Framework>().is_err() {
                warnings.push(format!("Compliance gate '{key}' does not match a known framework"));
            }
            if !(0.0..=100.0).contains(&gate.min_score) {
                errors.push(format!("Compliance gate '{key}' min_score {} is outside 0-100", gate.min_score));
            }
        }

        if config.gates.critical_rules.is_empty() {
            warnings.push("gates.critical_rules is empty: financial rule hits will not fail builds".to_string());
        }

        if let Some(template) = &config.output.report_template {
            if !Path::new(template).exists() {
                errors.push(format!("Report template does not exist: {template}"));
            }
        }

        ValidationResult::from_messages(errors, warnings)
    }
}
