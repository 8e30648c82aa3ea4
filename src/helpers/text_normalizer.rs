pub struct TextNormalizer;

impl TextNormalizer {
    /// Lower-cases and drops word separators so `CARD_NUMBER`, `cardNumber`
    /// and `card-number` all compare equal.
    pub fn normalize(text: &str) -> String {
        text.chars()
            .filter(|c| !Self::is_separator(*c))
            .flat_map(char::to_lowercase)
            .collect()
    }

    pub const fn is_separator(c: char) -> bool {
        matches!(c, '_' | '-') || c.is_whitespace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_and_case_are_ignored() {
        assert_eq!(TextNormalizer::normalize("CARD_NUMBER"), "cardnumber");
        assert_eq!(TextNormalizer::normalize("CardNumber"), "cardnumber");
        assert_eq!(TextNormalizer::normalize("card-number "), "cardnumber");
    }

    #[test]
    fn url_punctuation_is_kept() {
        assert_eq!(
            TextNormalizer::normalize("https://s3.ap-south-1.amazonaws.com"),
            "https://s3.apsouth1.amazonaws.com"
        );
    }
}
