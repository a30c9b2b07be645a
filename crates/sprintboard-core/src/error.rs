//! Error types for sprintboard-core
//!
//! The metrics engine itself is infallible; these errors cover loading
//! snapshots and configuration, plus a report type for tolerated anomalies.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for sprintboard operations
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

    #[error("Failed to parse TOML in {path}: {message}")]
    TomlParse {
        path: PathBuf,
        message: String,
        #[source]
        source: toml::de::Error,
    },

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ===================
    // Lookup Errors
    // ===================
    #[error("Sprint not found: {sprint_id}")]
    SprintNotFound { sprint_id: u64 },
}

/// Severity level for issues found during load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Data is usable, metrics may be skewed
    Warning,
    /// Significant but not fatal
    Error,
    /// Cannot continue
    Fatal,
}

/// Individual entry in a load report
#[derive(Debug, Clone)]
pub struct LoadError {
    pub source: String,
    pub message: String,
    pub severity: ErrorSeverity,
    /// Actionable suggestion for user (optional)
    pub suggestion: Option<String>,
}

impl LoadError {
    pub fn warning(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Warning,
            suggestion: None,
        }
    }

    /// Build a user-facing entry from a CoreError, with a hint where one helps
    pub fn from_core_error(source: impl Into<String>, error: &CoreError) -> Self {
        let source = source.into();
        let (message, suggestion, severity) = match error {
            CoreError::FileNotFound { path } => (
                format!("File not found: {}", path.display()),
                Some("Export a snapshot first or pass --snapshot <PATH>".to_string()),
                ErrorSeverity::Fatal,
            ),
            CoreError::FileRead { path, .. } => (
                format!("Cannot read file: {}", path.display()),
                Some(format!("Check permissions: chmod +r {}", path.display())),
                ErrorSeverity::Fatal,
            ),
            CoreError::JsonParse { path, message, .. } => (
                format!("Invalid JSON in {}: {}", path.display(), message),
                Some("Validate JSON syntax with: jq . <file>".to_string()),
                ErrorSeverity::Fatal,
            ),
            CoreError::TomlParse { path, message, .. } => (
                format!("Invalid TOML in {}: {}", path.display(), message),
                None,
                ErrorSeverity::Error,
            ),
            _ => (error.to_string(), None, ErrorSeverity::Error),
        };

        Self {
            source,
            message,
            severity,
            suggestion,
        }
    }
}

/// Report of issues encountered while loading a snapshot
///
/// Lets the dashboard render partial data instead of refusing outright.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub errors: Vec<LoadError>,
    pub snapshot_loaded: bool,
    pub projects_loaded: usize,
    pub tasks_loaded: usize,
    pub sprints_loaded: usize,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: LoadError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.errors.push(LoadError::warning(source, message));
    }

    pub fn has_fatal_errors(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.severity == ErrorSeverity::Fatal)
    }

    /// Returns true if there are any entries (including warnings)
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &LoadError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ErrorSeverity::Warning)
    }

    /// Returns (warnings, errors, fatal)
    pub fn error_count(&self) -> (usize, usize, usize) {
        self.errors
            .iter()
            .fold((0, 0, 0), |(w, e, f), entry| match entry.severity {
                ErrorSeverity::Warning => (w + 1, e, f),
                ErrorSeverity::Error => (w, e + 1, f),
                ErrorSeverity::Fatal => (w, e, f + 1),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_report_severity_counting() {
        let mut report = LoadReport::new();
        report.add_warning("projects", "Counts inconsistent");
        report.add_error(LoadError::from_core_error(
            "config",
            &CoreError::InvalidConfig {
                message: "activity_limit must be greater than zero".to_string(),
            },
        ));
        report.add_error(LoadError::from_core_error(
            "snapshot",
            &CoreError::FileNotFound {
                path: PathBuf::from("/tmp/none.json"),
            },
        ));

        let (warnings, errors, fatal) = report.error_count();
        assert_eq!(warnings, 1);
        assert_eq!(errors, 1);
        assert_eq!(fatal, 1);
        assert!(report.has_fatal_errors());
    }

    #[test]
    fn test_missing_snapshot_is_fatal_with_hint() {
        let err = CoreError::FileNotFound {
            path: PathBuf::from("/tmp/none.json"),
        };
        let entry = LoadError::from_core_error("snapshot", &err);
        assert_eq!(entry.severity, ErrorSeverity::Fatal);
        assert!(entry.suggestion.is_some());
    }
}
