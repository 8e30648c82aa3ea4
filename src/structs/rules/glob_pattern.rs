use std::fmt;
use crate::config::constants::GLOB_WILDCARD;
use crate::errors::{GuardError, GuardResult};
use crate::helpers::text_normalizer::TextNormalizer;

/// A `%`-wildcard pattern compiled against normalised text.
///
/// `%card%number%` is split into the literal segments `["", "card", "number", ""]`;
/// an empty first or last segment means that end is unanchored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobPattern {
    raw: String,
    segments: Vec<String>,
}

impl GlobPattern {
    pub fn compile(raw: &str) -> GuardResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GuardError::invalid_pattern(raw, "pattern is empty"));
        }
        if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(GuardError::invalid_pattern(raw, "pattern contains whitespace or control characters"));
        }
        if trimmed.contains('*') {
            return Err(GuardError::invalid_pattern(raw, "'*' is not a wildcard here, use '%'"));
        }

        let segments: Vec<String> = trimmed
            .split(GLOB_WILDCARD)
            .map(TextNormalizer::normalize)
            .collect();

        if segments.iter().all(String::is_empty) {
            return Err(GuardError::invalid_pattern(raw, "pattern has no literal text"));
        }

        Ok(Self {
            raw: trimmed.to_string(),
            segments,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `text` must already be normalised.
    pub fn matches_normalized(&self, text: &str) -> bool {
        if self.segments.len() == 1 {
            return text == self.segments[0];
        }

        let first = &self.segments[0];
        let last = &self.segments[self.segments.len() - 1];

        if !text.starts_with(first.as_str()) || !text.ends_with(last.as_str()) {
            return false;
        }
        if text.len() < first.len() + last.len() {
            return false;
        }

        let middle = &text[first.len()..text.len() - last.len()];
        let mut cursor = 0;
        for segment in &self.segments[1..self.segments.len() - 1] {
            if segment.is_empty() {
                continue;
            }
            match middle[cursor..].find(segment.as_str()) {
                Some(index) => cursor += index + segment.len(),
                None => return false,
            }
        }
        true
    }

    pub fn matches(&self, text: &str) -> bool {
        self.matches_normalized(&TextNormalizer::normalize(text))
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glob(raw: &str) -> GlobPattern {
        GlobPattern::compile(raw).unwrap()
    }

    #[test]
    fn contains_style_pattern() {
        let pattern = glob("%card%number%");
        assert!(pattern.matches("CardNumber"));
        assert!(pattern.matches("cardnumber"));
        assert!(pattern.matches("CARD_NUMBER"));
        assert!(pattern.matches("getCreditCardNumberMasked"));
        assert!(!pattern.matches("numberCard"));
    }

    #[test]
    fn anchored_ends() {
        let prefix = glob("card%");
        assert!(prefix.matches("cardHolder"));
        assert!(!prefix.matches("creditCard"));

        let suffix = glob("%pin");
        assert!(suffix.matches("atmPin"));
        assert!(!suffix.matches("pinning"));
    }

    #[test]
    fn pattern_without_wildcard_is_exact() {
        let pattern = glob("DES");
        assert!(pattern.matches("des"));
        assert!(!pattern.matches("desede"));
        assert!(!pattern.matches("modes"));
    }

    #[test]
    fn anchors_do_not_overlap() {
        let pattern = glob("ab%ba");
        assert!(!pattern.matches("aba"));
        assert!(pattern.matches("abba"));
    }

    #[test]
    fn malformed_patterns_are_rejected() {
        for raw in ["", "   ", "%%", "%_%", "card number", "card*", "%-%"] {
            assert!(GlobPattern::compile(raw).is_err(), "{raw:?} should be rejected");
        }
    }
}
