//! Custom error types for ZenBudget
//!
//! The calculation engine is total and never fails; everything around it
//! (storage, sync, export, AI collaborators, state patches) reports failures
//! through [`BudgetError`].

use thiserror::Error;

/// The main error type for ZenBudget operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for state patches and user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Sync errors (document store unreachable, write failed)
    #[error("Sync error: {0}")]
    Sync(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Receipt scanning or insight generation failed
    #[error("AI service error: {0}")]
    Ai(String),
}

impl BudgetError {
    /// Create a "not found" error for fixed expense items
    pub fn fixed_expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Fixed expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for user documents
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
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
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for BudgetError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<reqwest::Error> for BudgetError {
    fn from(err: reqwest::Error) -> Self {
        Self::Ai(err.to_string())
    }
}

impl From<crate::models::MoneyParseError> for BudgetError {
    fn from(err: crate::models::MoneyParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<crate::models::MonthParseError> for BudgetError {
    fn from(err: crate::models::MonthParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for ZenBudget operations
pub type BudgetResult<T> = Result<T, BudgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BudgetError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = BudgetError::fixed_expense_not_found("fx-1234abcd");
        assert_eq!(err.to_string(), "Fixed expense not found: fx-1234abcd");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BudgetError = io_err.into();
        assert!(matches!(err, BudgetError::Io(_)));
    }

    #[test]
    fn test_from_parse_errors() {
        let err: BudgetError = crate::models::Money::parse("abc").unwrap_err().into();
        assert!(err.is_validation());

        let err: BudgetError = crate::models::Month::parse("2025-13").unwrap_err().into();
        assert!(err.is_validation());
    }
}
