//! Domain error types
//!
//! This module defines the error hierarchy for Ferry. Errors are domain-specific
//! and don't expose third-party types; adapters convert driver and HTTP client
//! errors into these variants at the boundary.

use thiserror::Error;

/// Main Ferry error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum FerryError {
    /// Configuration-related errors (fatal for an invocation)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Backing store errors
    #[error("Database error: {0}")]
    Database(String),

    /// Identity provider could not be reached or returned garbage
    #[error("Identity provider error: {0}")]
    Identity(String),

    /// The caller's credential did not resolve to an identity
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// No contactable address for the tenant
    #[error("Missing recipient: {0}")]
    MissingRecipient(String),

    /// Mail provider rejected or failed to accept the message
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A per-tenant deadline elapsed
    #[error("Timed out: {0}")]
    Timeout(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl FerryError {
    /// Whether this error aborts the whole invocation rather than a single tenant
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FerryError::Configuration(_) | FerryError::Unauthorized(_)
        )
    }
}

/// Error raised while exporting a single table
///
/// Carries the table name so the job can report it without aborting its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{table_name}: {message}")]
pub struct TableError {
    /// Table that failed
    pub table_name: String,

    /// Error message
    pub message: String,
}

impl TableError {
    /// Creates a new table error
    pub fn new(table_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            message: message.into(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for FerryError {
    fn from(err: std::io::Error) -> Self {
        FerryError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for FerryError {
    fn from(err: serde_json::Error) -> Self {
        FerryError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for FerryError {
    fn from(err: toml::de::Error) -> Self {
        FerryError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv writer errors
impl From<csv::Error> for FerryError {
    fn from(err: csv::Error) -> Self {
        FerryError::Serialization(format!("CSV error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ferry_error_display() {
        let err = FerryError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(FerryError::Configuration("x".to_string()).is_fatal());
        assert!(FerryError::Unauthorized("x".to_string()).is_fatal());
        assert!(!FerryError::Database("x".to_string()).is_fatal());
        assert!(!FerryError::Delivery("x".to_string()).is_fatal());
    }

    #[test]
    fn test_table_error_display() {
        let err = TableError::new("invoices", "relation does not exist");
        assert_eq!(err.to_string(), "invoices: relation does not exist");
        assert_eq!(err.table_name, "invoices");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: FerryError = io_err.into();
        assert!(matches!(err, FerryError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: FerryError = json_err.into();
        assert!(matches!(err, FerryError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: FerryError = toml_err.into();
        assert!(matches!(err, FerryError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_ferry_error_implements_std_error() {
        let err = FerryError::Delivery("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
