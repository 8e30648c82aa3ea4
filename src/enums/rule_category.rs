use std::fmt;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use crate::enums::token_kind::TokenKind;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    Payment,
    Pii,
    Encryption,
    Localization,
}

impl RuleCategory {
    pub const ALL: [Self; 4] = [Self::Payment, Self::Pii, Self::Encryption, Self::Localization];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Pii => "pii",
            Self::Encryption => "encryption",
            Self::Localization => "localization",
        }
    }

    /// Field and method names carry payment/PII meaning; algorithm names and
    /// endpoints live in string literals.
    pub const fn applies_to(self, kind: TokenKind) -> bool {
        match self {
            Self::Payment | Self::Pii => matches!(kind, TokenKind::Identifier),
            Self::Encryption | Self::Localization => matches!(kind, TokenKind::StringLiteral),
        }
    }

    /// Encryption inputs are cipher transformations like `AES/GCM/NoPadding`
    /// whose components are judged one by one.
    pub const fn splits_components(self) -> bool {
        matches!(self, Self::Encryption)
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
