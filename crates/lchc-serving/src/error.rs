//! Error types for the prediction service.

use thiserror::Error;

use lchc_artifacts::ArtifactError;
use lchc_core::LchcError;
use lchc_data::DataError;
use lchc_model::ModelError;

/// Result type alias for serving operations.
pub type Result<T> = std::result::Result<T, ServingError>;

/// Errors that can occur while answering a prediction request.
#[derive(Debug, Error)]
pub enum ServingError {
    /// The request is missing a parameter or carries an unusable value.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// What was wrong with the request.
        message: String,
    },

    /// The model bundle could not be loaded from disk.
    #[error("Failed to load model bundle: {0}")]
    BundleLoad(#[from] ArtifactError),

    /// An estimator rejected the assembled features.
    #[error("Prediction failed: {0}")]
    Model(#[from] ModelError),

    /// Feature assembly failed.
    #[error("Feature assembly failed: {0}")]
    Data(#[from] DataError),

    /// A core invariant was violated.
    #[error(transparent)]
    Core(#[from] LchcError),

    /// The server socket could not be bound or driven.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServingError {
    /// Create an invalid-request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Whether the fault lies with the caller.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. })
    }

    /// Whether the fault lies with the service.
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_classification() {
        let err = ServingError::invalid_request("size_m2 must be positive");
        assert!(err.is_client_error());
        assert!(!err.is_server_error());

        let err = ServingError::BundleLoad(ArtifactError::NotFound(PathBuf::from("/m/ohe.bin")));
        assert!(err.is_server_error());
    }

    #[test]
    fn test_error_display() {
        let err = ServingError::invalid_request("missing location");
        assert_eq!(err.to_string(), "Invalid request: missing location");
    }
}
