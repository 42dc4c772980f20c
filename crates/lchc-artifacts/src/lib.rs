//! On-disk model bundle storage.
//!
//! Training writes one binary file per fitted artifact plus a JSON
//! manifest into a bundle directory; serving reads the directory back
//! into a [`ModelBundle`]. The manifest carries a format version so a
//! newer layout is rejected instead of misread.

pub mod bundle;
pub mod error;
pub mod store;

pub use bundle::{BundleManifest, ModelBundle, ValidationMetrics, FORMAT_VERSION};
pub use error::{ArtifactError, Result};
pub use store::{BundleReader, BundleWriter};
