use std::path::Path;
use crate::config::constants::SUPPORTED_FILE_EXTENSIONS;
use crate::enums::token_kind::TokenKind;
use crate::structs::source::source_token::SourceToken;

/// Languages where `'` opens a one-character literal or marks a lifetime or
/// label, never a string.
const CHAR_LITERAL_LANGUAGES: &[&str] = &["java", "kotlin", "scala", "rust", "go", "csharp", "c", "cpp", "swift"];

/// Longest char literal body accepted after a backslash, e.g. `\u{1F600}`.
const MAX_ESCAPE_LEN: usize = 10;

/// Pulls identifiers and string literals out of source text line by line.
///
/// This is deliberately not a parser: it knows quotes, escapes and comments,
/// which is all that is needed to hand field names and literals to the
/// evaluator with a usable location.
#[derive(Debug, Clone, Copy)]
pub struct TokenExtractor {
    line_comment: &'static str,
    block_comments: bool,
    char_literals: bool,
}

impl TokenExtractor {
    pub const fn new(line_comment: &'static str) -> Self {
        Self {
            line_comment,
            block_comments: matches!(line_comment.as_bytes(), b"//"),
            char_literals: false,
        }
    }

    /// Treat `'` as a char literal delimiter instead of a string quote.
    pub const fn with_char_literals(mut self) -> Self {
        self.char_literals = true;
        self
    }

    /// `None` for files whose extension is not a supported source type.
    pub fn for_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        SUPPORTED_FILE_EXTENSIONS
            .iter()
            .find(|(ext, _, _)| *ext == extension)
            .map(|(_, language, comment)| {
                let extractor = Self::new(comment);
                if CHAR_LITERAL_LANGUAGES.contains(language) {
                    extractor.with_char_literals()
                } else {
                    extractor
                }
            })
    }

    pub fn language_for(path: &Path) -> Option<&'static str> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        SUPPORTED_FILE_EXTENSIONS
            .iter()
            .find(|(ext, _, _)| *ext == extension)
            .map(|(_, language, _)| *language)
    }

    pub fn extract(&self, content: &str) -> Vec<SourceToken> {
        let mut tokens = Vec::new();
        let mut in_block_comment = false;
        let comment: Vec<char> = self.line_comment.chars().collect();

        for (line_index, line) in content.lines().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            let line_number = line_index + 1;
            let mut i = 0;

            while i < chars.len() {
                if in_block_comment {
                    if chars[i] == '*' && chars.get(i + 1) == Some(&'/') {
                        in_block_comment = false;
                        i += 2;
                    } else {
                        i += 1;
                    }
                    continue;
                }

                let c = chars[i];

                if chars[i..].starts_with(&comment) {
                    break;
                }

                if self.block_comments && c == '/' && chars.get(i + 1) == Some(&'*') {
                    in_block_comment = true;
                    i += 2;
                    continue;
                }

                if c == '\'' && self.char_literals {
                    // Anything that is not `'x'` or `'\n'` is a lifetime or label.
                    i = Self::char_literal_end(&chars, i).map_or(i + 1, |end| end + 1);
                    continue;
                }

                if c == '"' || c == '\'' {
                    match Self::read_string(&chars, i) {
                        Some((literal, end)) => {
                            Self::push(&mut tokens, literal, TokenKind::StringLiteral, line_number, i + 1);
                            i = end + 1;
                        }
                        // An unterminated double quote runs to the end of the line;
                        // a lone single quote is usually an apostrophe.
                        None if c == '"' => {
                            let literal: String = chars[i + 1..].iter().collect();
                            Self::push(&mut tokens, literal, TokenKind::StringLiteral, line_number, i + 1);
                            break;
                        }
                        None => i += 1,
                    }
                    continue;
                }

                if Self::is_identifier_start(c) {
                    let start = i;
                    while i < chars.len() && Self::is_identifier_continue(chars[i]) {
                        i += 1;
                    }
                    let identifier: String = chars[start..i].iter().collect();
                    Self::push(&mut tokens, identifier, TokenKind::Identifier, line_number, start + 1);
                    continue;
                }

                i += 1;
            }
        }

        tokens
    }

    /// Returns the unescaped literal and the index of its closing quote.
    fn read_string(chars: &[char], start: usize) -> Option<(String, usize)> {
        let quote = chars[start];
        let mut literal = String::new();
        let mut j = start + 1;

        while j < chars.len() {
            match chars[j] {
                '\\' if j + 1 < chars.len() => {
                    literal.push(chars[j + 1]);
                    j += 2;
                }
                c if c == quote => return Some((literal, j)),
                c => {
                    literal.push(c);
                    j += 1;
                }
            }
        }
        None
    }

    /// Index of the closing quote of a char literal opening at `start`.
    fn char_literal_end(chars: &[char], start: usize) -> Option<usize> {
        match chars.get(start + 1)? {
            '\\' => chars
                .iter()
                .enumerate()
                .skip(start + 3)
                .take(MAX_ESCAPE_LEN)
                .find(|(_, c)| **c == '\'')
                .map(|(j, _)| j),
            '\'' => None,
            _ => (chars.get(start + 2) == Some(&'\'')).then_some(start + 2),
        }
    }

    /// `column` is 1-based. Identifiers report their first character and
    /// literals report their opening quote, which is where editors and SARIF
    /// viewers place the caret for the whole token.
    fn push(tokens: &mut Vec<SourceToken>, text: String, kind: TokenKind, line: usize, column: usize) {
        if text.trim().is_empty() {
            return;
        }
        tokens.push(SourceToken { text, kind, line, column });
    }

    const fn is_identifier_start(c: char) -> bool {
        c.is_ascii_alphabetic() || c == '_' || c == '$'
    }

    const fn is_identifier_continue(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || c == '$'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[SourceToken], kind: TokenKind) -> Vec<&str> {
        tokens.iter().filter(|t| t.kind == kind).map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn java_field_and_cipher_literal() {
        let source = r#"private String cardNumber = "4111";
Cipher c = Cipher.getInstance("DES/ECB/PKCS5Padding");"#;
        let tokens = TokenExtractor::new("//").extract(source);

        assert_eq!(
            texts(&tokens, TokenKind::Identifier),
            vec!["private", "String", "cardNumber", "Cipher", "c", "Cipher", "getInstance"]
        );
        assert_eq!(texts(&tokens, TokenKind::StringLiteral), vec!["4111", "DES/ECB/PKCS5Padding"]);

        let cipher = tokens.iter().find(|t| t.text.starts_with("DES")).unwrap();
        assert_eq!((cipher.line, cipher.column), (2, 31));
    }

    #[test]
    fn comments_are_skipped() {
        let source = "int a; // cvv in a comment\n/* cardNumber\n still comment */ int b;\n";
        let tokens = TokenExtractor::new("//").extract(source);
        assert_eq!(texts(&tokens, TokenKind::Identifier), vec!["int", "a", "int", "b"]);
    }

    #[test]
    fn hash_comments_and_escaped_quotes() {
        let source = "region = \"us-east-1\\\"x\"  # ap-south-1\n";
        let tokens = TokenExtractor::new("#").extract(source);
        assert_eq!(texts(&tokens, TokenKind::StringLiteral), vec!["us-east-1\"x"]);
        assert_eq!(texts(&tokens, TokenKind::Identifier), vec!["region"]);
    }

    #[test]
    fn comment_markers_inside_strings_are_literal_text() {
        let tokens = TokenExtractor::new("//").extract(r#"url = "https://s3.eu-west-1.amazonaws.com";"#);
        assert_eq!(texts(&tokens, TokenKind::StringLiteral), vec!["https://s3.eu-west-1.amazonaws.com"]);
    }

    #[test]
    fn lone_single_quote_does_not_swallow_the_line() {
        let rust = TokenExtractor::for_path(Path::new("src/lib.rs")).unwrap();
        let tokens = rust.extract("fn get<'a>(card_number: &'a str) {}");
        assert!(texts(&tokens, TokenKind::Identifier).contains(&"card_number"));
    }

    #[test]
    fn char_literals_and_labels_in_rust() {
        let rust = TokenExtractor::for_path(Path::new("src/lib.rs")).unwrap();
        let tokens = rust.extract(r"let sep = '/'; let q = '\''; 'outer: for pan_number in x { let u = '\u{41}'; }");

        assert!(texts(&tokens, TokenKind::StringLiteral).is_empty());
        let identifiers = texts(&tokens, TokenKind::Identifier);
        assert!(identifiers.contains(&"pan_number"));
        assert!(identifiers.contains(&"u"));
        assert!(identifiers.contains(&"outer"));
    }

    #[test]
    fn java_char_literal_is_not_a_string() {
        let java = TokenExtractor::for_path(Path::new("Card.java")).unwrap();
        let tokens = java.extract("char sep = '-'; String cardNumber = \"4111\";");
        assert_eq!(texts(&tokens, TokenKind::StringLiteral), vec!["4111"]);
        assert!(texts(&tokens, TokenKind::Identifier).contains(&"cardNumber"));
    }

    #[test]
    fn single_quoted_strings_in_scripting_languages() {
        let python = TokenExtractor::for_path(Path::new("settings.py")).unwrap();
        let tokens = python.extract("REGION = 'us-east-1'  # primary");
        assert_eq!(texts(&tokens, TokenKind::StringLiteral), vec!["us-east-1"]);

        let typescript = TokenExtractor::for_path(Path::new("client.ts")).unwrap();
        let tokens = typescript.extract("const mode = 'DES/ECB/NoPadding';");
        assert_eq!(texts(&tokens, TokenKind::StringLiteral), vec!["DES/ECB/NoPadding"]);
    }

    #[test]
    fn extractor_chosen_by_extension() {
        assert!(TokenExtractor::for_path(Path::new("src/Payment.java")).is_some());
        assert!(TokenExtractor::for_path(Path::new("deploy/values.YAML")).is_some());
        assert!(TokenExtractor::for_path(Path::new("logo.png")).is_none());
        assert_eq!(TokenExtractor::language_for(Path::new("app.py")), Some("python"));
    }
}
