use std::collections::HashSet;
use crate::config::builtin_rules::BUILTIN_RULE_SETS;
use crate::errors::{GuardError, GuardResult};
use crate::structs::config::rules_config::{RuleSetConfig, RulesConfig};
use crate::structs::rules::glob_pattern::GlobPattern;
use crate::structs::rules::pattern_rule::PatternRule;
use crate::structs::rules::rule_set::RuleSet;

/// Every successfully compiled rule set, in evaluation order.
///
/// The catalog is built once per process and then only read, so it is shared
/// between scanner threads behind an `Arc` without any locking.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rule_sets: Vec<RuleSet>,
}

impl RuleCatalog {
    /// Loads built-in and configured rule sets. A set that fails to compile is
    /// reported in the returned errors and left out; the rest still load.
    pub fn load(config: &RulesConfig) -> (Self, Vec<GuardError>) {
        let mut definitions: Vec<RuleSetConfig> = if config.include_builtin {
            BUILTIN_RULE_SETS.clone()
        } else {
            Vec::new()
        };

        for custom in &config.rule_sets {
            match definitions.iter_mut().find(|d| d.name == custom.name) {
                Some(existing) => {
                    log::debug!("🔁 Rule set '{}' replaces the built-in definition", custom.name);
                    *existing = custom.clone();
                }
                None => definitions.push(custom.clone()),
            }
        }

        let mut rule_sets = Vec::with_capacity(definitions.len());
        let mut errors = Vec::new();

        for definition in &definitions {
            match Self::compile_rule_set(definition) {
                Ok(rule_set) => {
                    log::debug!("📋 Loaded rule set '{}' ({} rules)", rule_set.name, rule_set.rules.len());
                    rule_sets.push(rule_set);
                }
                Err(e) => {
                    log::warn!("⚠️ Skipping rule set '{}': {}", definition.name, e);
                    errors.push(e);
                }
            }
        }

        (Self { rule_sets }, errors)
    }

    #[cfg(test)]
    pub fn builtin() -> (Self, Vec<GuardError>) {
        Self::load(&RulesConfig::default())
    }

    pub fn compile_rule_set(definition: &RuleSetConfig) -> GuardResult<RuleSet> {
        let fail = |reason: String| GuardError::rule_set_error(&definition.name, &reason);

        if definition.name.trim().is_empty() {
            return Err(fail("rule set name is empty".to_string()));
        }
        if definition.rules.is_empty() {
            return Err(fail("rule set has no rules".to_string()));
        }

        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(definition.rules.len());

        for rule in &definition.rules {
            if rule.id.trim().is_empty() {
                return Err(fail("rule with an empty id".to_string()));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(fail(format!("duplicate rule id '{}'", rule.id)));
            }
            if rule.patterns.is_empty() {
                return Err(fail(format!("rule '{}' has no patterns", rule.id)));
            }

            let compile_all = |patterns: &[String]| -> GuardResult<Vec<GlobPattern>> {
                patterns
                    .iter()
                    .map(|p| GlobPattern::compile(p))
                    .collect::<GuardResult<Vec<_>>>()
                    .map_err(|e| fail(format!("rule '{}': {}", rule.id, e)))
            };

            rules.push(PatternRule {
                id: rule.id.clone(),
                category: definition.category,
                patterns: compile_all(&rule.patterns)?,
                allow_patterns: compile_all(&rule.allow_patterns)?,
                severity: rule.severity,
                compliance_tag: rule.compliance_tag.clone(),
                message: if rule.message.is_empty() {
                    format!("{} pattern matched", definition.category)
                } else {
                    rule.message.clone()
                },
            });
        }

        Ok(RuleSet {
            name: definition.name.clone(),
            category: definition.category,
            rules,
        })
    }

    pub fn rule_sets(&self) -> &[RuleSet] {
        &self.rule_sets
    }

    pub fn rules(&self) -> impl Iterator<Item = &PatternRule> {
        self.rule_sets.iter().flat_map(|set| set.rules.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.rule_sets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::rule_category::RuleCategory;
    use crate::enums::severity::Severity;
    use crate::structs::config::pattern_rule::PatternRuleConfig;

    fn has_rule(catalog: &RuleCatalog, id: &str) -> bool {
        catalog.rules().any(|rule| rule.id == id)
    }

    fn custom_set(name: &str, category: RuleCategory, patterns: &[&str]) -> RuleSetConfig {
        RuleSetConfig {
            name: name.to_string(),
            category,
            rules: vec![PatternRuleConfig {
                id: format!("{name}-rule"),
                patterns: patterns.iter().map(ToString::to_string).collect(),
                allow_patterns: vec![],
                severity: Severity::Low,
                compliance_tag: String::new(),
                message: String::new(),
            }],
        }
    }

    #[test]
    fn builtin_rule_sets_all_compile() {
        let (catalog, errors) = RuleCatalog::builtin();
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(catalog.rule_sets().len(), 4);
        assert!(has_rule(&catalog, "payment-data-exposure"));
        assert_eq!(catalog.rules().filter(|r| r.category == RuleCategory::Encryption).count(), 3);
    }

    #[test]
    fn malformed_set_is_skipped_and_others_survive() {
        let config = RulesConfig {
            include_builtin: true,
            rule_sets: vec![
                custom_set("broken", RuleCategory::Pii, &["%ok%", "bad*glob"]),
                custom_set("insurance", RuleCategory::Pii, &["%policy%holder%"]),
            ],
        };

        let (catalog, errors) = RuleCatalog::load(&config);

        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], GuardError::RuleSetLoadError { rule_set, .. } if rule_set == "broken"));
        assert!(catalog.rule_sets().iter().all(|s| s.name != "broken"));
        assert!(has_rule(&catalog, "insurance-rule"));
        assert!(has_rule(&catalog, "pii-exposure"));
    }

    #[test]
    fn custom_set_replaces_builtin_with_same_name() {
        let config = RulesConfig {
            include_builtin: true,
            rule_sets: vec![custom_set("payment", RuleCategory::Payment, &["%wallet%"])],
        };
        let (catalog, errors) = RuleCatalog::load(&config);
        assert!(errors.is_empty());
        assert!(!has_rule(&catalog, "payment-data-exposure"));
        assert!(has_rule(&catalog, "payment-rule"));
        assert_eq!(catalog.rule_sets()[0].name, "payment");
    }

    #[test]
    fn duplicate_rule_ids_fail_the_set() {
        let mut definition = custom_set("dupes", RuleCategory::Payment, &["%a1%"]);
        definition.rules.push(definition.rules[0].clone());
        let err = RuleCatalog::compile_rule_set(&definition).unwrap_err();
        assert!(err.to_string().contains("duplicate rule id"));
    }

    #[test]
    fn builtins_can_be_disabled() {
        let config = RulesConfig {
            include_builtin: false,
            rule_sets: vec![],
        };
        let (catalog, errors) = RuleCatalog::load(&config);
        assert!(errors.is_empty());
        assert!(catalog.is_empty());
    }
}
