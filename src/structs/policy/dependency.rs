use std::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl Dependency {
    /// Parses `name@version` or a bare `name`. Blank lines and `#` comments yield `None`.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            return None;
        }
        match line.rsplit_once('@') {
            Some((name, version)) if !name.is_empty() => Some(Self {
                name: name.trim().to_string(),
                version: Some(version.trim().to_string()).filter(|v| !v.is_empty()),
            }),
            _ => Some(Self {
                name: line.to_string(),
                version: None,
            }),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{}", self.name, version),
            None => f.write_str(&self.name),
        }
    }
}
