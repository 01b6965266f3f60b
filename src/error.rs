//! Custom error types for the report compiler
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for report compiler operations
#[derive(Error, Debug)]
pub enum ReportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// CSV serialization errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// A record source failed for one kind
    ///
    /// The aggregator recovers from these locally; they never reach callers
    /// of an export.
    #[error("Source '{source_name}' failed for {kind}: {message}")]
    Source {
        source_name: String,
        kind: String,
        message: String,
    },

    /// Unrecognized export mode
    #[error("Invalid export mode '{0}' (expected snapshot, yaml, tabular or document)")]
    InvalidMode(String),

    /// The drawing surface could not be created
    #[error("Rendering library unavailable: {0}")]
    RenderingUnavailable(String),

    /// The drawing surface failed while producing the document
    #[error("Render error: {0}")]
    Render(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ReportError {
    /// Create a source failure for a kind
    pub fn source_failure(
        source_name: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Source {
            source_name: source_name.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Check if this is an invalid mode error
    pub fn is_invalid_mode(&self) -> bool {
        matches!(self, Self::InvalidMode(_))
    }

    /// Check if the rendering surface was unavailable
    pub fn is_rendering_unavailable(&self) -> bool {
        matches!(self, Self::RenderingUnavailable(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for ReportError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for report compiler operations
pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReportError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_source_failure() {
        let err = ReportError::source_failure("remote", "debts", "permission denied");
        assert_eq!(
            err.to_string(),
            "Source 'remote' failed for debts: permission denied"
        );
    }

    #[test]
    fn test_invalid_mode() {
        let err = ReportError::InvalidMode("xml".into());
        assert!(err.is_invalid_mode());
        assert!(!err.is_rendering_unavailable());
        assert!(err.to_string().contains("'xml'"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let report_err: ReportError = io_err.into();
        assert!(matches!(report_err, ReportError::Io(_)));
    }
}
