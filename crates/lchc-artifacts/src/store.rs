//! Reading and writing model bundles on disk.
//!
//! A bundle directory holds one binary file per fitted artifact plus a
//! JSON manifest:
//!
//! ```text
//! lchc_models/
//!   best_material_clf.bin
//!   best_cost_reg.bin
//!   num_scaler.bin
//!   ohe.bin
//!   material_map.bin
//!   manifest.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::bundle::{BundleManifest, ModelBundle, FORMAT_VERSION};
use crate::error::{ArtifactError, Result};

const CLASSIFIER_FILE: &str = "best_material_clf.bin";
const REGRESSOR_FILE: &str = "best_cost_reg.bin";
const SCALER_FILE: &str = "num_scaler.bin";
const ENCODER_FILE: &str = "ohe.bin";
const MATERIAL_MAP_FILE: &str = "material_map.bin";
const MANIFEST_FILE: &str = "manifest.json";

/// Writes a bundle directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct BundleWriter {
    dir: PathBuf,
}

impl BundleWriter {
    /// Create a writer targeting `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist every artifact and the manifest.
    pub fn write(&self, bundle: &ModelBundle, manifest: &BundleManifest) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| ArtifactError::Io {
            path: self.dir.clone(),
            source,
        })?;

        self.write_artifact(CLASSIFIER_FILE, &bundle.classifier)?;
        self.write_artifact(REGRESSOR_FILE, &bundle.regressor)?;
        self.write_artifact(SCALER_FILE, &bundle.scaler)?;
        self.write_artifact(ENCODER_FILE, &bundle.encoder)?;
        self.write_artifact(MATERIAL_MAP_FILE, &bundle.material_map)?;

        let path = self.dir.join(MANIFEST_FILE);
        let json = serde_json::to_vec_pretty(manifest)?;
        fs::write(&path, json).map_err(|source| ArtifactError::Io { path, source })?;

        info!(dir = %self.dir.display(), "Wrote model bundle");
        Ok(())
    }

    fn write_artifact<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let bytes = bincode::serialize(value).map_err(|e| ArtifactError::Corrupted {
            path: path.clone(),
            message: e.to_string(),
        })?;
        fs::write(&path, bytes).map_err(|source| ArtifactError::Io { path, source })
    }
}

/// Reads a bundle directory written by [`BundleWriter`].
#[derive(Debug, Clone)]
pub struct BundleReader {
    dir: PathBuf,
}

impl BundleReader {
    /// Create a reader for `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load the manifest and reject unknown format versions.
    pub fn read_manifest(&self) -> Result<BundleManifest> {
        let path = self.dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Err(ArtifactError::NotFound(path));
        }
        let bytes = fs::read(&path).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;
        let manifest: BundleManifest = serde_json::from_slice(&bytes)?;
        if manifest.format_version != FORMAT_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: manifest.format_version,
                expected: FORMAT_VERSION,
            });
        }
        Ok(manifest)
    }

    /// Load every artifact into a bundle, validating the manifest first.
    pub fn read(&self) -> Result<ModelBundle> {
        self.read_manifest()?;
        Ok(ModelBundle {
            classifier: self.read_artifact(CLASSIFIER_FILE)?,
            regressor: self.read_artifact(REGRESSOR_FILE)?,
            scaler: self.read_artifact(SCALER_FILE)?,
            encoder: self.read_artifact(ENCODER_FILE)?,
            material_map: self.read_artifact(MATERIAL_MAP_FILE)?,
        })
    }

    fn read_artifact<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Err(ArtifactError::NotFound(path));
        }
        let bytes = fs::read(&path).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;
        bincode::deserialize(&bytes).map_err(|e| ArtifactError::Corrupted {
            path,
            message: e.to_string(),
        })
    }
}
