use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum GuardError {
    // Configuration errors
    #[error("Configuration Error: {message}{}", .field.as_ref().map(|f| format!(" (field: {f})")).unwrap_or_default())]
    ConfigurationError {
        message: String,
        field: Option<String>,
    },
    #[error("Configuration file error at '{path}': {reason}")]
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // Rule loading errors
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        pattern: String,
        reason: String,
    },
    #[error("Rule set '{rule_set}' was not loaded: {reason}")]
    RuleSetLoadError {
        rule_set: String,
        reason: String,
    },

    // File operation errors
    #[error("File operation '{operation}' failed for '{file_path}': {reason}")]
    FileOperationError {
        file_path: String,
        operation: String,
        reason: String,
    },

    // Parser errors
    #[error("Parse error in {content_type}: {reason}{}", .line_number.map(|l| format!(" (line {l})")).unwrap_or_default())]
    ParseError {
        content_type: String,
        line_number: Option<usize>,
        reason: String,
    },

    // Validation errors
    #[error("Validation error for field '{field}': value '{value}' violates constraint '{constraint}'")]
    ValidationError {
        field: String,
        value: String,
        constraint: String,
    },

    // System errors
    #[error("System error during {operation}: {reason}")]
    SystemError {
        operation: String,
        reason: String,
    },

    // Multiple errors (for batch operations)
    #[error("{} errors occurred during {context}", .errors.len())]
    MultipleErrors {
        errors: Vec<GuardError>,
        context: String,
    },
}

impl GuardError {
    pub fn config_error(message: &str, field: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(ToString::to_string),
        }
    }

    pub fn invalid_pattern(pattern: &str, reason: &str) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn rule_set_error(rule_set: &str, reason: &str) -> Self {
        Self::RuleSetLoadError {
            rule_set: rule_set.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn file_error(file_path: &str, operation: &str, reason: &str) -> Self {
        Self::FileOperationError {
            file_path: file_path.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn parse_error(content_type: &str, line_number: Option<usize>, reason: &str) -> Self {
        Self::ParseError {
            content_type: content_type.to_string(),
            line_number,
            reason: reason.to_string(),
        }
    }

    pub fn validation_error(field: &str, value: &str, constraint: &str) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SystemError { .. } => ErrorSeverity::Critical,
            Self::FileOperationError { .. } | Self::ConfigurationFileError { .. } => ErrorSeverity::High,
            Self::ParseError { .. } | Self::RuleSetLoadError { .. } => ErrorSeverity::Medium,
            Self::InvalidPattern { .. } | Self::ValidationError { .. } | Self::ConfigurationError { .. } => {
                ErrorSeverity::Low
            }
            Self::MultipleErrors { errors, .. } => errors
                .iter()
                .map(Self::severity)
                .max()
                .unwrap_or(ErrorSeverity::Low),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationFileError { .. } => format!("{self}\n💡 Check file permissions and syntax"),
            Self::InvalidPattern { .. } => format!("{self}\n💡 Use '%' as the only wildcard, e.g. '%card%number%'"),
            Self::ParseError { .. } => format!("{self}\n💡 Check the format and syntax of the input"),
            Self::MultipleErrors { errors, context } => {
                let mut msg = format!("Multiple errors occurred during {context}:\n");
                for (i, error) in errors.iter().enumerate() {
                    msg.push_str(&format!("  {}. {}\n", i + 1, error.user_message().replace('\n', "\n     ")));
                }
                msg
            }
            _ => self.to_string(),
        }
    }

    pub fn with_context(self, context: &str) -> Self {
        match self {
            Self::MultipleErrors { errors, context: existing_context } => Self::MultipleErrors {
                errors,
                context: format!("{existing_context} -> {context}"),
            },
            _ => Self::MultipleErrors {
                errors: vec![self],
                context: context.to_string(),
            },
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for bfsi-guard operations
pub type GuardResult<T> = Result<T, GuardError>;

/// Error handler for consistent error processing
pub struct ErrorHandler;

impl ErrorHandler {
    /// Handle error with appropriate logging and user feedback
    pub fn handle_error(error: &GuardError) {
        let severity = error.severity();
        log::error!("[{}] {:?}", severity.name(), error);
        eprintln!("{} {}", severity.emoji(), error.user_message());
    }

    /// Report load problems grouped by severity, highest first.
    pub fn handle_multiple_errors(errors: &[GuardError], context: &str) {
        if errors.is_empty() {
            return;
        }

        log::warn!("⚠️ {} problem(s) during {}:", errors.len(), context);

        let mut by_severity: BTreeMap<ErrorSeverity, Vec<&GuardError>> = BTreeMap::new();
        for error in errors {
            by_severity.entry(error.severity()).or_default().push(error);
        }

        for (severity, severity_errors) in by_severity.iter().rev() {
            for error in severity_errors {
                log::warn!("  {} {}", severity.emoji(), error.user_message().replace('\n', "\n     "));
            }
        }
    }
}

/// Extension trait for Result to attach the failing operation
pub trait ResultExt<T> {
    fn with_operation(self, operation: &str) -> GuardResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<GuardError>,
{
    fn with_operation(self, operation: &str) -> GuardResult<T> {
        self.map_err(|e| match e.into() {
            GuardError::SystemError { reason, .. } => GuardError::SystemError {
                operation: operation.to_string(),
                reason,
            },
            other => other.with_context(operation),
        })
    }
}

/// Convert from standard library errors
impl From<std::io::Error> for GuardError {
    fn from(error: std::io::Error) -> Self {
        Self::system_error("I/O operation", &error.to_string())
    }
}

impl From<serde_json::Error> for GuardError {
    fn from(error: serde_json::Error) -> Self {
        Self::ParseError {
            content_type: "JSON".to_string(),
            line_number: Some(error.line()),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for GuardError {
    fn from(error: toml::de::Error) -> Self {
        Self::ParseError {
            content_type: "TOML".to_string(),
            line_number: None,
            reason: error.message().to_string(),
        }
    }
}

impl From<toml::ser::Error> for GuardError {
    fn from(error: toml::ser::Error) -> Self {
        Self::system_error("TOML serialization", &error.to_string())
    }
}

impl From<quick_xml::Error> for GuardError {
    fn from(error: quick_xml::Error) -> Self {
        Self::ParseError {
            content_type: "XML".to_string(),
            line_number: None,
            reason: error.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for GuardError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::system_error("background task", &error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_errors_take_highest_severity() {
        let error = GuardError::MultipleErrors {
            errors: vec![
                GuardError::invalid_pattern("*", "bad"),
                GuardError::file_error("a.sarif", "read", "denied"),
            ],
            context: "loading".to_string(),
        };
        assert_eq!(error.severity(), ErrorSeverity::High);
    }

    #[test]
    fn with_operation_rewrites_system_errors() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        match result.with_operation("reading policy") {
            Err(GuardError::SystemError { operation, reason }) => {
                assert_eq!(operation, "reading policy");
                assert!(reason.contains("gone"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn display_includes_field() {
        let error = GuardError::config_error("missing rules", Some("rules.rule_sets"));
        assert_eq!(error.to_string(), "Configuration Error: missing rules (field: rules.rule_sets)");
    }
}
