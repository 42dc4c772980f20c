//! Error types for the lchc-model crate.

use thiserror::Error;

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while fitting or applying estimators.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The input matrix has no rows.
    #[error("Input is empty")]
    EmptyInput,

    /// Feature count does not match what the estimator was fitted with.
    #[error("Dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch {
        /// Feature count seen at fit time.
        expected: usize,
        /// Feature count of the offending input.
        actual: usize,
    },

    /// Targets and rows disagree in length.
    #[error("Length mismatch: {rows} rows but {targets} targets")]
    LengthMismatch {
        /// Number of input rows.
        rows: usize,
        /// Number of targets.
        targets: usize,
    },

    /// The estimator has not been fitted yet.
    #[error("Estimator is not fitted")]
    NotFitted,

    /// A hyperparameter is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ModelError {
    /// Create an invalid-configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::DimensionMismatch {
            expected: 6,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch: expected 6 features, got 4"
        );

        let err = ModelError::LengthMismatch {
            rows: 10,
            targets: 8,
        };
        assert_eq!(err.to_string(), "Length mismatch: 10 rows but 8 targets");

        assert_eq!(ModelError::EmptyInput.to_string(), "Input is empty");
        assert_eq!(ModelError::NotFitted.to_string(), "Estimator is not fitted");
    }
}
