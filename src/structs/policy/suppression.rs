use chrono::NaiveDate;
use crate::helpers::text_normalizer::TextNormalizer;
use crate::structs::rules::glob_pattern::GlobPattern;
use crate::structs::rules::match_result::MatchResult;

/// One `<suppress>` entry of a suppression list.
#[derive(Debug, Clone, Default)]
pub struct Suppression {
    pub notes: String,
    pub until: Option<NaiveDate>,
    pub rule_ids: Vec<String>,
    pub file_patterns: Vec<GlobPattern>,
    pub package_patterns: Vec<GlobPattern>,
}

impl Suppression {
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.until.map_or(true, |until| today <= until)
    }

    /// An entry with neither rules nor files never applies to findings.
    pub fn suppresses_finding(&self, finding: &MatchResult) -> bool {
        if self.rule_ids.is_empty() && self.file_patterns.is_empty() {
            return false;
        }

        let rule_matches = self.rule_ids.is_empty() || self.rule_ids.iter().any(|id| id == &finding.rule_id);
        let file_matches = self.file_patterns.is_empty()
            || finding.source_location.as_ref().is_some_and(|location| {
                let file = TextNormalizer::normalize(&location.file);
                self.file_patterns.iter().any(|p| p.matches_normalized(&file))
            });

        rule_matches && file_matches
    }

    pub fn suppresses_package(&self, name: &str) -> bool {
        self.package_patterns.iter().any(|p| p.matches(name))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SuppressionList {
    pub entries: Vec<Suppression>,
}

impl SuppressionList {
    /// Drops entries whose `until` date has passed.
    pub fn active_on(self, today: NaiveDate) -> Self {
        let (active, expired): (Vec<_>, Vec<_>) = self.entries.into_iter().partition(|s| s.is_active(today));
        for entry in &expired {
            log::warn!(
                "⏰ Suppression expired on {}: {}",
                entry.until.map(|d| d.to_string()).unwrap_or_default(),
                entry.notes
            );
        }
        Self { entries: active }
    }

    pub fn find_for_finding(&self, finding: &MatchResult) -> Option<&Suppression> {
        self.entries.iter().find(|s| s.suppresses_finding(finding))
    }

    pub fn find_for_package(&self, name: &str) -> Option<&Suppression> {
        self.entries.iter().find(|s| s.suppresses_package(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
