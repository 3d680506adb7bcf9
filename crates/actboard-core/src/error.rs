//! Error types for actboard-core
//!
//! `CoreError` covers failures that stop an operation (a month cannot be
//! fetched). `LoadReport` collects non-fatal data-quality issues so a
//! dataset can still be shown while the problems are surfaced.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for actboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    // ===================
    // Parse Errors
    // ===================
    #[error("Failed to parse JSON in {path}: {message}")]
    JsonParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    // ===================
    // Data Errors
    // ===================
    #[error("No data available for {month}")]
    MonthNotFound { month: String },

    #[error("Unknown month: {input}")]
    InvalidMonth { input: String },

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl CoreError {
    /// Short user-facing hint for the status bar / CLI
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CoreError::FileNotFound { path } => {
                Some(format!("Add a dataset file at {}", path.display()))
            }
            CoreError::DirectoryNotFound { path } => {
                Some(format!("Create directory: mkdir -p {}", path.display()))
            }
            CoreError::JsonParse { .. } => {
                Some("Validate JSON syntax with: jq . <file>".to_string())
            }
            CoreError::InvalidMonth { .. } => {
                Some("Use a full month name (e.g. May) or a 3-letter abbreviation".to_string())
            }
            _ => None,
        }
    }
}

/// Severity of a data-quality issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    /// Data is usable but inconsistent
    Warning,
    /// Data is likely wrong (e.g. duplicate agents)
    Error,
}

/// Individual issue found while validating a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct LoadIssue {
    /// Where the issue was found (e.g. `monthly[E1]`, `daily[2024-05-01][E2]`)
    pub source: String,
    pub message: String,
    pub severity: IssueSeverity,
}

impl LoadIssue {
    pub fn warning(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: IssueSeverity::Warning,
        }
    }

    pub fn error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: IssueSeverity::Error,
        }
    }
}

/// Report of issues encountered while validating a dataset
///
/// Never rejects data: issues are logged and the dataset is still applied.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub issues: Vec<LoadIssue>,
    pub monthly_rows: usize,
    pub days: usize,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.issues.push(LoadIssue::warning(source, message));
    }

    pub fn add_error(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.issues.push(LoadIssue::error(source, message));
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns (warnings, errors)
    pub fn issue_count(&self) -> (usize, usize) {
        let warnings = self
            .issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
            .count();
        (warnings, self.issues.len() - warnings)
    }
}
