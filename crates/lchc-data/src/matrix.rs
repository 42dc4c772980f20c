//! Assembly of model inputs from the cleaned dataset and the curated
//! materials reference.

use ndarray::{Array2, Axis};

use lchc_core::{combo_to_std_category, MaterialMap, NUMERIC_FEATURES};

use crate::dataset::Dataset;
use crate::error::{DataError, Result};
use crate::reference::MaterialsRef;

/// Training inputs in model-ready form.
///
/// Numeric columns follow [`NUMERIC_FEATURES`]: building size plus the
/// per-category material averages joined in from the curated table.
/// Categorical columns hold the raw location and budget level strings,
/// to be one-hot encoded downstream. Targets are the material class code
/// and the log1p-transformed cost.
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    x_num: Array2<f64>,
    x_cat: Vec<Vec<String>>,
    y_material: Vec<usize>,
    y_log_cost: Vec<f64>,
    material_map: MaterialMap,
}

impl DesignMatrix {
    /// Join the dataset against the materials reference and build the
    /// numeric matrix, categorical rows, and both targets.
    pub fn build(dataset: &Dataset, materials: &MaterialsRef) -> Result<Self> {
        let records = dataset.records();
        let material_map =
            MaterialMap::from_combos(records.iter().map(|r| r.material_combo.clone()));

        let mut num = Vec::with_capacity(records.len() * NUMERIC_FEATURES.len());
        let mut x_cat = Vec::with_capacity(records.len());
        let mut y_material = Vec::with_capacity(records.len());
        let mut y_log_cost = Vec::with_capacity(records.len());

        for record in records {
            let category = combo_to_std_category(&record.material_combo).ok_or_else(|| {
                DataError::UnknownCombo {
                    combo: record.material_combo.clone(),
                }
            })?;
            let averages = materials.averages_for(category)?;

            num.extend_from_slice(&[
                record.building_size_m2,
                averages.avg_gwp,
                averages.avg_density,
                averages.avg_speed,
            ]);
            x_cat.push(vec![record.location.clone(), record.budget_level.clone()]);

            // from_combos saw every combo, so the lookup cannot miss.
            let class = material_map
                .index_of(&record.material_combo)
                .ok_or_else(|| DataError::UnknownCombo {
                    combo: record.material_combo.clone(),
                })?;
            y_material.push(class);
            y_log_cost.push(record.est_cost_usd.ln_1p());
        }

        let x_num = Array2::from_shape_vec((records.len(), NUMERIC_FEATURES.len()), num)
            .map_err(|e| DataError::Shape {
                message: e.to_string(),
            })?;

        Ok(Self {
            x_num,
            x_cat,
            y_material,
            y_log_cost,
            material_map,
        })
    }

    /// Numeric feature matrix, one row per sample.
    pub fn x_num(&self) -> &Array2<f64> {
        &self.x_num
    }

    /// Categorical feature rows, `[location, budget_level]` per sample.
    pub fn x_cat(&self) -> &[Vec<String>] {
        &self.x_cat
    }

    /// Material class codes.
    pub fn y_material(&self) -> &[usize] {
        &self.y_material
    }

    /// log1p-transformed cost targets.
    pub fn y_log_cost(&self) -> &[f64] {
        &self.y_log_cost
    }

    /// Mapping between class codes and combo names.
    pub fn material_map(&self) -> &MaterialMap {
        &self.material_map
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.y_material.len()
    }

    /// Whether the matrix is empty.
    pub fn is_empty(&self) -> bool {
        self.y_material.is_empty()
    }
}

/// Concatenate scaled numeric columns and encoded categorical columns
/// into one feature matrix.
pub fn hstack_features(x_num: &Array2<f64>, x_cat: &Array2<f64>) -> Result<Array2<f64>> {
    ndarray::concatenate(Axis(1), &[x_num.view(), x_cat.view()]).map_err(|e| DataError::Shape {
        message: e.to_string(),
    })
}

/// Select the given rows of a matrix.
pub fn take_rows(x: &Array2<f64>, rows: &[usize]) -> Array2<f64> {
    x.select(Axis(0), rows)
}

/// Select the given positions of a slice.
pub fn take<T: Clone>(values: &[T], rows: &[usize]) -> Vec<T> {
    rows.iter().map(|&i| values[i].clone()).collect()
}
