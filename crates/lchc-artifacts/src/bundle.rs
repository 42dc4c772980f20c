//! The trained model bundle and its manifest.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use lchc_core::MaterialMap;
use lchc_model::{MinMaxScaler, OneHotEncoder, RandomForestClassifier, VotingRegressor};

/// Bundle format version written by this build.
pub const FORMAT_VERSION: u32 = 1;

/// Everything inference needs, as produced by one training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    /// Material classifier.
    pub classifier: RandomForestClassifier,
    /// Cost regressor operating on log1p targets.
    pub regressor: VotingRegressor,
    /// Scaler for the numeric feature block.
    pub scaler: MinMaxScaler,
    /// Encoder for the categorical feature block.
    pub encoder: OneHotEncoder,
    /// Class code to combo name mapping.
    pub material_map: MaterialMap,
}

/// Validation metrics recorded at training time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationMetrics {
    /// Classifier accuracy on the held-out split.
    pub accuracy: f64,
    /// Regressor mean absolute error, USD scale.
    pub mae: f64,
    /// Regressor root mean squared error, USD scale.
    pub rmse: f64,
    /// Regressor coefficient of determination, USD scale.
    pub r2: f64,
}

/// Sidecar metadata written alongside the binary artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleManifest {
    /// Format version for backward compatibility.
    pub format_version: u32,
    /// Unix timestamp of the training run.
    pub created_unix: u64,
    /// Rows used for fitting.
    pub train_samples: usize,
    /// Rows held out for validation.
    pub test_samples: usize,
    /// Held-out metrics, absent if validation was skipped.
    pub metrics: Option<ValidationMetrics>,
}

impl BundleManifest {
    /// Create a manifest stamped with the current time.
    pub fn new(train_samples: usize, test_samples: usize, metrics: Option<ValidationMetrics>) -> Self {
        let created_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            format_version: FORMAT_VERSION,
            created_unix,
            train_samples,
            test_samples,
            metrics,
        }
    }
}
