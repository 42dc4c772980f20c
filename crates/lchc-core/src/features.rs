//! The feature-vector schema shared by training and inference.
//!
//! A single feature row is the numeric block `[size_m2, avg_gwp, avg_density,
//! avg_speed]` followed by the one-hot block for `[location, budget_level]`.
//! Inference must assemble rows with exactly this layout; everything that
//! depends on column order lives here so the two sides cannot drift.

use serde::{Deserialize, Serialize};

/// Numeric feature columns, in vector order.
pub const NUMERIC_FEATURES: [&str; 4] = ["building_size_m2", "avg_gwp", "avg_density", "avg_speed"];

/// Categorical feature columns, in vector order.
pub const CATEGORICAL_FEATURES: [&str; 2] = ["location", "budget_level"];

/// Proxy material averages used at inference time.
///
/// The online side does not know the predicted material before building the
/// feature row, so it substitutes fixed mid-range averages rather than the
/// true per-material means used during training.
pub const PROXY_AVG_GWP: f64 = 80.0;
pub const PROXY_AVG_DENSITY: f64 = 1200.0;
pub const PROXY_AVG_SPEED: f64 = 0.8;

/// The numeric half of a feature row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericFeatures {
    /// Building size in square meters.
    pub size_m2: f64,
    /// Average global-warming potential of the material category.
    pub avg_gwp: f64,
    /// Average density of the material category.
    pub avg_density: f64,
    /// Average build speed of the material category.
    pub avg_speed: f64,
}

impl NumericFeatures {
    /// Numeric features for an inference request, with proxy averages.
    pub fn with_proxy_averages(size_m2: f64) -> Self {
        Self {
            size_m2,
            avg_gwp: PROXY_AVG_GWP,
            avg_density: PROXY_AVG_DENSITY,
            avg_speed: PROXY_AVG_SPEED,
        }
    }

    /// The numeric block in schema order.
    pub fn to_array(self) -> [f64; 4] {
        [self.size_m2, self.avg_gwp, self.avg_density, self.avg_speed]
    }
}
