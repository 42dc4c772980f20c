//! Error types for dataset loading and assembly.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading or assembling training data.
#[derive(Debug, Error)]
pub enum DataError {
    /// A CSV file could not be read or parsed.
    #[error("Failed to read {path}: {source}")]
    Csv {
        /// The file that failed.
        path: PathBuf,
        /// The underlying csv error.
        #[source]
        source: csv::Error,
    },

    /// The dataset has no usable rows after cleaning.
    #[error("Dataset is empty: {path}")]
    Empty {
        /// The file that produced no rows.
        path: PathBuf,
    },

    /// A material combo has no standard category in the taxonomy.
    #[error("Unknown material combo: {combo}")]
    UnknownCombo {
        /// The offending combo name.
        combo: String,
    },

    /// The reference table lacks an entry for a standard category.
    #[error("No reference averages for category: {category}")]
    MissingCategory {
        /// The category with no reference rows.
        category: String,
    },

    /// Assembled columns do not line up into a rectangular matrix.
    #[error("Feature matrix shape error: {message}")]
    Shape {
        /// Description of the mismatch.
        message: String,
    },
}
