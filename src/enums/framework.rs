use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Framework {
    #[serde(rename = "RBI-IT-Framework")]
    Rbi,
    #[serde(rename = "ISO27001")]
    Iso27001,
    #[serde(rename = "SEBI-Guidelines")]
    Sebi,
}

impl Framework {
    pub const ALL: [Self; 3] = [Self::Rbi, Self::Iso27001, Self::Sebi];

    /// Name used on the command line and in report headings.
    pub const fn standard_name(self) -> &'static str {
        match self {
            Self::Rbi => "RBI-IT-Framework",
            Self::Iso27001 => "ISO27001",
            Self::Sebi => "SEBI-Guidelines",
        }
    }

    /// Short key used by compliance score files and gate configuration.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Rbi => "rbi",
            Self::Iso27001 => "iso27001",
            Self::Sebi => "sebi",
        }
    }

    pub const fn category(self) -> &'static str {
        match self {
            Self::Rbi => "Information Security",
            Self::Iso27001 => "Information Security Management",
            Self::Sebi => "System Governance",
        }
    }

    pub fn parse_list(list: &str) -> Result<Vec<Self>, String> {
        let mut frameworks = Vec::new();
        for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let framework = item.parse::<Self>()?;
            if !frameworks.contains(&framework) {
                frameworks.push(framework);
            }
        }
        Ok(frameworks)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.standard_name())
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rbi" | "rbi-it-framework" => Ok(Self::Rbi),
            "iso27001" | "iso-27001" => Ok(Self::Iso27001),
            "sebi" | "sebi-guidelines" => Ok(Self::Sebi),
            other => Err(format!("unknown compliance standard '{other}'")),
        }
    }
}
