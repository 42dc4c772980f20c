//! Error types for the lchc core library.

use thiserror::Error;

/// The main error type for core operations.
#[derive(Debug, Error)]
pub enum LchcError {
    /// Error when a dataset column is missing or malformed.
    #[error("Data error: {message}")]
    DataError {
        /// A description of the data problem.
        message: String,
    },

    /// Error when a material combo is not part of the known taxonomy.
    #[error("Unknown material combo: {combo}")]
    UnknownCombo {
        /// The combo name that was not recognized.
        combo: String,
    },

    /// Error when a feature vector has the wrong width.
    #[error("Invalid feature width: expected {expected}, got {actual}")]
    InvalidWidth {
        /// The expected number of features.
        expected: usize,
        /// The actual number of features provided.
        actual: usize,
    },

    /// Error during configuration parsing or validation.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// A description of the configuration error.
        message: String,
    },
}

impl LchcError {
    /// Create a data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::DataError {
            message: msg.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError {
            message: msg.into(),
        }
    }
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, LchcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LchcError::data("missing column est_cost_usd");
        assert_eq!(err.to_string(), "Data error: missing column est_cost_usd");

        let err = LchcError::UnknownCombo {
            combo: "straw_bale".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown material combo: straw_bale");

        let err = LchcError::InvalidWidth {
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Invalid feature width: expected 4, got 3");
    }
}
