use std::cmp::Ordering;
use std::path::Path;
use chrono::NaiveDate;
use crate::enums::dependency_verdict::DependencyVerdict;
use crate::errors::{GuardError, GuardResult};
use crate::helpers::text_normalizer::TextNormalizer;
use crate::helpers::version::compare_versions;
use crate::structs::policy::compliance_policy::{ApprovedDependency, CompliancePolicy, ConditionalApproval, ProhibitedDependency};
use crate::structs::policy::dependency::Dependency;
use crate::structs::policy::policy_report::{DependencyCheck, PolicyReport};
use crate::structs::policy::suppression::SuppressionList;
use crate::structs::rules::glob_pattern::GlobPattern;

/// A policy entry paired with its compiled name pattern.
struct Compiled<'a, T> {
    pattern: GlobPattern,
    entry: &'a T,
}

fn compile<T>(entries: &[T], name: impl Fn(&T) -> &str) -> GuardResult<Vec<Compiled<'_, T>>> {
    entries
        .iter()
        .map(|entry| {
            Ok(Compiled {
                pattern: GlobPattern::compile(name(entry))?,
                entry,
            })
        })
        .collect()
}

fn find<'a, 'b, T>(compiled: &'b [Compiled<'a, T>], normalized: &str) -> Option<&'a T> {
    compiled.iter().find(|c| c.pattern.matches_normalized(normalized)).map(|c| c.entry)
}

/// Judges declared dependencies against the approval policy.
pub struct PolicyChecker<'a> {
    policy: &'a CompliancePolicy,
    prohibited: Vec<Compiled<'a, ProhibitedDependency>>,
    conditional: Vec<Compiled<'a, ConditionalApproval>>,
    approved: Vec<Compiled<'a, ApprovedDependency>>,
}

impl<'a> PolicyChecker<'a> {
    pub fn new(policy: &'a CompliancePolicy) -> GuardResult<Self> {
        Ok(Self {
            policy,
            prohibited: compile(&policy.prohibited_dependencies, |p| p.name.as_str())?,
            conditional: compile(&policy.conditional_approvals, |c| c.name.as_str())?,
            approved: compile(&policy.approved_dependencies, |a| a.name.as_str())?,
        })
    }

    /// First matching table wins: prohibited, then conditional, then approved.
    pub fn verdict(&self, dependency: &Dependency, today: NaiveDate) -> DependencyVerdict {
        let name = TextNormalizer::normalize(&dependency.name);
        let version = dependency.version.as_deref();

        if let Some(prohibited) = find(&self.prohibited, &name) {
            let applies = match (&prohibited.below_version, version) {
                (Some(below), Some(version)) => compare_versions(version, below) == Ordering::Less,
                _ => true,
            };
            if applies {
                return DependencyVerdict::Prohibited {
                    reason: prohibited.reason.clone(),
                };
            }
        }

        if let Some(conditional) = find(&self.conditional, &name) {
            return match conditional.expires {
                Some(expires) if today > expires => DependencyVerdict::ConditionalExpired { expired_on: expires },
                _ => DependencyVerdict::Conditional {
                    conditions: conditional.conditions.clone(),
                },
            };
        }

        if let Some(approved) = find(&self.approved, &name) {
            return match (&approved.min_version, version) {
                (Some(minimum), Some(version)) if compare_versions(version, minimum) == Ordering::Less => {
                    DependencyVerdict::BelowMinimum {
                        minimum: minimum.clone(),
                    }
                }
                _ => DependencyVerdict::Approved,
            };
        }

        DependencyVerdict::Unlisted
    }

    /// Violations named by an active suppression become `Suppressed`.
    pub fn check(&self, dependencies: &[Dependency], suppressions: &SuppressionList, today: NaiveDate) -> PolicyReport {
        let results = dependencies
            .iter()
            .map(|dependency| {
                let mut verdict = self.verdict(dependency, today);
                if verdict.is_violation() {
                    if let Some(suppression) = suppressions.find_for_package(&dependency.name) {
                        log::info!("🔕 {} {} suppressed: {}", dependency, verdict.label(), suppression.notes);
                        verdict = DependencyVerdict::Suppressed {
                            notes: suppression.notes.clone(),
                        };
                    }
                }
                DependencyCheck {
                    dependency: dependency.clone(),
                    verdict,
                }
            })
            .collect();

        PolicyReport::new(self.policy.policy_version.clone(), results)
    }

    pub async fn load_policy(path: &Path) -> GuardResult<CompliancePolicy> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GuardError::file_error(&path.to_string_lossy(), "read policy", &e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| GuardError::parse_error("policy JSON", Some(e.line()), &e.to_string()))
    }

    pub async fn load_dependencies(path: &Path) -> GuardResult<Vec<Dependency>> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GuardError::file_error(&path.to_string_lossy(), "read dependencies", &e.to_string()))?;
        Ok(content.lines().filter_map(Dependency::parse_line).collect())
    }
}
