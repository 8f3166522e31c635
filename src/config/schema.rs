use crate::file::DEFAULT_EXTENSION;
use crate::pdf::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_DIRECTORY: &str = "pdf_files";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PdfModConfig {
    /// Candidate directory, relative to the working directory unless absolute.
    pub directory: String,
    /// Recognized file suffix, including the leading dot.
    pub extension: String,
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for PdfModConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_DIRECTORY.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY.as_millis() as u64,
        }
    }
}

impl PdfModConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.directory.trim().is_empty() {
            issues.push(ValidationIssue::MissingField { field: "directory" });
        }

        if !self.extension.starts_with('.') || self.extension.len() < 2 {
            issues.push(ValidationIssue::InvalidValue {
                field: "extension",
                message: format!("'{}' must be a dot followed by a suffix", self.extension),
            });
        }

        if self.max_attempts == 0 {
            issues.push(ValidationIssue::InvalidValue {
                field: "max_attempts",
                message: "must be at least 1".to_string(),
            });
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingField {
        field: &'static str,
    },
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingField { field } => write!(f, "missing field: {field}"),
            ValidationIssue::InvalidValue { field, message } => {
                write!(f, "invalid {field}: {message}")
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

impl std::error::Error for ValidationError {}
