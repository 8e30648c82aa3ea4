use std::sync::Arc;
use crate::enums::rule_category::RuleCategory;
use crate::helpers::text_normalizer::TextNormalizer;
use crate::services::rule_catalog::RuleCatalog;
use crate::structs::rules::match_result::MatchResult;
use crate::structs::rules::pattern_rule::PatternRule;
use crate::structs::source::source_location::SourceLocation;
use crate::structs::source::source_token::SourceToken;

/// Stateless matcher over a shared, read-only catalog.
#[derive(Debug, Clone)]
pub struct PatternEvaluator {
    catalog: Arc<RuleCatalog>,
}

impl PatternEvaluator {
    pub const fn new(catalog: Arc<RuleCatalog>) -> Self {
        Self { catalog }
    }

    /// One result per matching rule, in catalog order. `None` tests every category.
    pub fn evaluate(&self, text: &str, category: Option<RuleCategory>) -> Vec<MatchResult> {
        let normalized = TextNormalizer::normalize(text);
        self.catalog
            .rules()
            .filter(|rule| category.map_or(true, |c| rule.category == c))
            .filter_map(|rule| Self::evaluate_rule(rule, text, &normalized))
            .collect()
    }

    pub fn first_match(&self, text: &str, category: Option<RuleCategory>) -> Option<MatchResult> {
        let normalized = TextNormalizer::normalize(text);
        self.catalog
            .rules()
            .filter(|rule| category.map_or(true, |c| rule.category == c))
            .find_map(|rule| Self::evaluate_rule(rule, text, &normalized))
    }

    /// Runs the categories that apply to the token's kind and stamps the location.
    pub fn evaluate_token(&self, token: &SourceToken, file: &str) -> Vec<MatchResult> {
        let normalized = TextNormalizer::normalize(&token.text);
        if normalized.is_empty() {
            return Vec::new();
        }

        self.catalog
            .rules()
            .filter(|rule| rule.category.applies_to(token.kind))
            .filter_map(|rule| Self::evaluate_rule(rule, &token.text, &normalized))
            .map(|result| {
                result.at(SourceLocation {
                    file: file.to_string(),
                    line: token.line,
                    column: token.column,
                })
            })
            .collect()
    }

    fn evaluate_rule(rule: &PatternRule, text: &str, normalized: &str) -> Option<MatchResult> {
        if rule.is_allowed(normalized) {
            return None;
        }

        if rule.category.splits_components() {
            return text.split('/').find_map(|component| {
                let component_normalized = TextNormalizer::normalize(component);
                if component_normalized.is_empty() {
                    return None;
                }
                rule.first_match(&component_normalized)
                    .map(|pattern| MatchResult::new(rule, component.trim(), pattern.raw()))
            });
        }

        rule.first_match(normalized)
            .map(|pattern| MatchResult::new(rule, text, pattern.raw()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::token_kind::TokenKind;
    use proptest::prelude::*;

    fn evaluator() -> PatternEvaluator {
        let (catalog, errors) = RuleCatalog::builtin();
        assert!(errors.is_empty());
        PatternEvaluator::new(Arc::new(catalog))
    }

    #[test]
    fn cvv_field_is_payment_data() {
        let results = evaluator().evaluate("cvvCode", None);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].rule_id, "payment-data-exposure");
        assert_eq!(results[0].category, RuleCategory::Payment);
        assert_eq!(results[0].matched_pattern, "%cvv%");
    }

    #[test]
    fn card_number_spellings_all_match() {
        let evaluator = evaluator();
        for name in ["CardNumber", "cardnumber", "CARD_NUMBER", "card-number"] {
            let result = evaluator.first_match(name, Some(RuleCategory::Payment)).unwrap();
            assert_eq!(result.matched_pattern, "%card%number%", "{name}");
        }
    }

    #[test]
    fn des_ecb_transformation_yields_two_findings() {
        let results = evaluator().evaluate("DES/ECB/PKCS5Padding", Some(RuleCategory::Encryption));
        let ids: Vec<_> = results.iter().map(|r| r.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["weak-transaction-encryption", "weak-cipher-mode"]);
        assert_eq!(results[0].matched_text, "DES");
        assert_eq!(results[1].matched_text, "ECB");
    }

    #[test]
    fn des_ecb_without_category_still_yields_exactly_two() {
        assert_eq!(evaluator().evaluate("DES/ECB/PKCS5Padding", None).len(), 2);
    }

    #[test]
    fn strong_transformation_is_clean() {
        assert!(evaluator().evaluate("AES/GCM/NoPadding", None).is_empty());
    }

    #[test]
    fn unrelated_field_matches_nothing() {
        assert!(evaluator().evaluate("userPreferredLanguage", None).is_empty());
    }

    #[test]
    fn words_that_merely_contain_rule_fragments_are_clean() {
        let evaluator = evaluator();
        for identifier in ["companyNumber", "company_card", "leastUsed"] {
            assert!(evaluator.evaluate(identifier, None).is_empty(), "{identifier} should not match");
        }
        for literal in ["leastUsed", "houseAsterisk", "bestusage"] {
            assert!(
                evaluator.evaluate(literal, Some(RuleCategory::Localization)).is_empty(),
                "{literal} should not match"
            );
        }
        assert_eq!(evaluator.evaluate("panNumber", Some(RuleCategory::Payment)).len(), 1);
        assert_eq!(evaluator.evaluate("PAN_CARD", Some(RuleCategory::Pii)).len(), 1);
    }

    #[test]
    fn azure_regions_match_as_values_or_host_labels() {
        let evaluator = evaluator();
        for literal in ["eastus", "WestEurope", "https://pay.eastus.cloudapp.azure.com"] {
            assert_eq!(evaluator.evaluate(literal, Some(RuleCategory::Localization)).len(), 1, "{literal}");
        }
        assert!(evaluator.evaluate("centralindia", Some(RuleCategory::Localization)).is_empty());
    }

    #[test]
    fn indian_region_suppresses_localization_finding() {
        let evaluator = evaluator();
        let mixed = "https://replica.us-east-1.example.com,https://primary.ap-south-1.example.com";
        assert!(evaluator.evaluate(mixed, Some(RuleCategory::Localization)).is_empty());

        let foreign = "https://s3.us-east-1.amazonaws.com/statements";
        let results = evaluator.evaluate(foreign, Some(RuleCategory::Localization));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].rule_id, "rbi-data-localization");
    }

    #[test]
    fn tokens_only_see_categories_for_their_kind() {
        let evaluator = evaluator();
        let literal = SourceToken {
            text: "cardNumber".to_string(),
            kind: TokenKind::StringLiteral,
            line: 3,
            column: 9,
        };
        assert!(evaluator.evaluate_token(&literal, "A.java").is_empty());

        let identifier = SourceToken {
            kind: TokenKind::Identifier,
            ..literal
        };
        let results = evaluator.evaluate_token(&identifier, "A.java");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source_location.as_ref().unwrap().to_string(), "A.java:3:9");
    }

    proptest! {
        #[test]
        fn any_text_containing_cvv_matches_payment(prefix in "[a-zA-Z]{0,8}", suffix in "[a-zA-Z_]{0,8}") {
            let text = format!("{prefix}CvV{suffix}");
            let result = evaluator().first_match(&text, Some(RuleCategory::Payment));
            prop_assert!(result.is_some());
            prop_assert_eq!(result.unwrap().rule_id, "payment-data-exposure");
        }

        #[test]
        fn ap_south_1_never_triggers_localization(noise in "[a-z0-9./:-]{0,20}") {
            let text = format!("https://{noise}us-east-1{noise}/ap-south-1/{noise}");
            prop_assert!(evaluator().evaluate(&text, Some(RuleCategory::Localization)).is_empty());
        }

        #[test]
        fn case_never_changes_the_outcome(text in "[a-zA-Z_/-]{1,24}") {
            let evaluator = evaluator();
            let lower: Vec<_> = evaluator.evaluate(&text.to_lowercase(), None).into_iter().map(|r| r.rule_id).collect();
            let upper: Vec<_> = evaluator.evaluate(&text.to_uppercase(), None).into_iter().map(|r| r.rule_id).collect();
            prop_assert_eq!(lower, upper);
        }
    }
}
