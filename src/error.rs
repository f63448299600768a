//! Custom error types for storebooks
//!
//! This module defines the error hierarchy for the ledger using thiserror.
//! Only `Validation` and `Schema` originate in the ledger core; the other
//! variants belong to the CSV, config and audit boundaries.

use thiserror::Error;

/// The main error type for storebooks operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A cell edit or imported value was rejected (negative amount, bad day, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// An imported table does not have the expected columns or rows
    #[error("Schema error: {0}")]
    Schema(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// CSV reader/writer errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Import errors not covered by schema or validation failures
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl LedgerError {
    /// Create a "not found" error for an income category name
    pub fn income_category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Income category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for an expense category name
    pub fn expense_category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense category",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a schema error
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for storebooks operations
pub type LedgerResult<T> = Result<T, LedgerError>;
