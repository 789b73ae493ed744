//! Error types for the rankwise workspace.
//!
//! Every failure in the ranking core is structural: the caller handed over a
//! table or configuration that breaks a contract. There is no I/O in the
//! core, so there are no transient failures and nothing to retry.

use thiserror::Error;

/// The main error type for rankwise operations.
#[derive(Debug, Error)]
pub enum RankwiseError {
    /// An input-shape contract was violated before any computation started,
    /// e.g. the number of weights does not match the number of ranked tables.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A table is malformed (ragged rows, unordered dates, duplicate keys).
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A date or reporting-quarter string could not be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A required column is missing from a DataFrame.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A factor source has no table for the requested factor.
    #[error("Factor not found: {0}")]
    FactorNotFound(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl RankwiseError {
    /// Returns true for contract violations detected before computation.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<String> for RankwiseError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for RankwiseError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for rankwise operations.
pub type Result<T> = std::result::Result<T, RankwiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RankwiseError::Configuration("2 tables but 3 weights".to_string());
        assert_eq!(err.to_string(), "Configuration error: 2 tables but 3 weights");

        let err = RankwiseError::MissingColumn("date".to_string());
        assert_eq!(err.to_string(), "Missing required column: date");
    }

    #[test]
    fn test_is_configuration() {
        assert!(RankwiseError::Configuration("x".into()).is_configuration());
        assert!(!RankwiseError::InvalidData("x".into()).is_configuration());
    }

    #[test]
    fn test_error_from_string() {
        let err: RankwiseError = "boom".into();
        assert!(matches!(err, RankwiseError::Other(_)));
    }
}
