use std::fmt;
use std::str::FromStr;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord, ValueEnum)]
pub enum Severity {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "critical")]
    Critical,
}

impl Severity {
    pub const ALL: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    /// Maps a SARIF `level` onto a severity. A missing level is treated as `note`.
    pub fn from_sarif_level(level: Option<&str>) -> Self {
        match level.map(str::to_ascii_lowercase).as_deref() {
            Some("error" | "critical") => Self::Critical,
            Some("warning") => Self::High,
            Some("note") | None => Self::Medium,
            Some(_) => Self::Low,
        }
    }

    pub const fn sarif_level(self) -> &'static str {
        match self {
            Self::Critical => "error",
            Self::High => "warning",
            Self::Medium => "note",
            Self::Low => "none",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(format!("unknown severity '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sarif_levels_map_like_codeql_output() {
        assert_eq!(Severity::from_sarif_level(Some("error")), Severity::Critical);
        assert_eq!(Severity::from_sarif_level(Some("Warning")), Severity::High);
        assert_eq!(Severity::from_sarif_level(Some("note")), Severity::Medium);
        assert_eq!(Severity::from_sarif_level(None), Severity::Medium);
        assert_eq!(Severity::from_sarif_level(Some("none")), Severity::Low);
    }

    #[test]
    fn written_levels_read_back_to_the_same_severity() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_sarif_level(Some(severity.sarif_level())), severity);
        }
    }

    #[test]
    fn ordering_puts_critical_highest() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::Medium > Severity::Low);
    }
}
