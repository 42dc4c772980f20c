//! Error types for artifact storage.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for artifact operations.
pub type Result<T> = std::result::Result<T, ArtifactError>;

/// Errors that can occur while writing or loading model bundles.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// An expected artifact file does not exist.
    #[error("Artifact not found: {0}")]
    NotFound(PathBuf),

    /// A filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An artifact file exists but cannot be decoded.
    #[error("Corrupted artifact {path}: {message}")]
    Corrupted {
        /// The file that failed to decode.
        path: PathBuf,
        /// Decoder error description.
        message: String,
    },

    /// The bundle manifest could not be encoded or decoded.
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// The manifest declares a format this build cannot read.
    #[error("Unsupported bundle format version {found}, expected {expected}")]
    UnsupportedVersion {
        /// Version found in the manifest.
        found: u32,
        /// Version this build writes and reads.
        expected: u32,
    },
}
