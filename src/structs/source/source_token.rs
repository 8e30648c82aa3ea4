use crate::enums::token_kind::TokenKind;

/// A token pulled out of a source line. `line` and `column` are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceToken {
    pub text: String,
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}
