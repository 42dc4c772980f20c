//! Request validation and single-sample prediction.

use std::path::Path;

use ndarray::Array2;
use serde::Serialize;
use tracing::debug;

use lchc_artifacts::BundleReader;
use lchc_core::NumericFeatures;
use lchc_data::hstack_features;

use crate::error::{Result, ServingError};

/// A validated prediction request.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictRequest {
    /// Building size in square meters, strictly positive.
    pub size_m2: f64,
    /// Location category, trimmed and non-empty.
    pub location: String,
    /// Budget level, lowercased. May be empty.
    pub budget_level: String,
}

impl PredictRequest {
    /// Validate raw query parameters.
    ///
    /// The size must parse to a positive number and the location must be
    /// non-empty after trimming. The budget level is normalized to
    /// lowercase but otherwise unconstrained; unknown categories encode
    /// to an all-zero block downstream.
    pub fn from_parts(
        size_m2: Option<&str>,
        location: Option<&str>,
        budget_level: Option<&str>,
    ) -> Result<Self> {
        let size_m2 = size_m2
            .ok_or_else(|| ServingError::invalid_request("missing size_m2"))?
            .trim()
            .parse::<f64>()
            .map_err(|_| ServingError::invalid_request("size_m2 is not a number"))?;
        if !size_m2.is_finite() || size_m2 <= 0.0 {
            return Err(ServingError::invalid_request("size_m2 must be positive"));
        }

        let location = location.unwrap_or_default().trim().to_string();
        if location.is_empty() {
            return Err(ServingError::invalid_request("missing location"));
        }

        let budget_level = budget_level.unwrap_or_default().trim().to_lowercase();

        Ok(Self {
            size_m2,
            location,
            budget_level,
        })
    }
}

/// A prediction response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Recommended material combination.
    pub predicted_material: String,
    /// Estimated cost in USD, rounded to cents.
    pub predicted_cost_usd: f64,
}

/// Load the bundle from `model_dir` and predict material and cost for one
/// request.
///
/// The bundle is read from disk on every call, so a retrained bundle
/// takes effect without a restart. Material properties are unknown at
/// request time and stand in as the proxy averages baked into
/// [`NumericFeatures::with_proxy_averages`]; the cost model predicts on
/// the log1p scale and the result is mapped back before rounding.
pub fn predict(model_dir: &Path, request: &PredictRequest) -> Result<Prediction> {
    let bundle = BundleReader::new(model_dir).read()?;

    let numeric = NumericFeatures::with_proxy_averages(request.size_m2);
    let x_num = Array2::from_shape_vec((1, 4), numeric.to_array().to_vec())
        .map_err(|e| ServingError::invalid_request(e.to_string()))?;
    let x_num = bundle.scaler.transform(&x_num)?;

    let cat_row = vec![vec![request.location.clone(), request.budget_level.clone()]];
    let x_cat = bundle.encoder.transform(&cat_row)?;

    let features = hstack_features(&x_num, &x_cat)?;

    let class = bundle.classifier.predict(&features)?[0];
    let predicted_material = bundle.material_map.name_of(class)?.to_string();

    let log_cost = bundle.regressor.predict(&features)?[0];
    let cost = log_cost.exp_m1();
    let predicted_cost_usd = (cost * 100.0).round() / 100.0;

    debug!(
        size_m2 = request.size_m2,
        location = %request.location,
        material = %predicted_material,
        cost_usd = predicted_cost_usd,
        "Served prediction"
    );

    Ok(Prediction {
        predicted_material,
        predicted_cost_usd,
    })
}
