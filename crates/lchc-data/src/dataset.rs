//! Loading and cleaning of the housing-project dataset.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{DataError, Result};

/// One raw row of `data.csv`. Any field may be missing.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    /// Building size in square meters.
    pub building_size_m2: Option<f64>,
    /// Location category.
    pub location: Option<String>,
    /// Budget level category.
    pub budget_level: Option<String>,
    /// Material combination used.
    pub material_combo: Option<String>,
    /// Estimated construction cost in USD.
    pub est_cost_usd: Option<f64>,
}

/// One cleaned row: every gap filled by imputation.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    pub building_size_m2: f64,
    pub location: String,
    pub budget_level: String,
    pub material_combo: String,
    pub est_cost_usd: f64,
}

/// The cleaned training dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<CleanRecord>,
}

impl Dataset {
    /// Load the dataset from a CSV file and impute missing values.
    ///
    /// Numeric gaps take the column median, categorical gaps the column
    /// mode, matching the offline preprocessing the models were specified
    /// against.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .from_path(path)
            .map_err(|source| DataError::Csv {
                path: path.to_path_buf(),
                source,
            })?;

        let mut raw = Vec::new();
        for record in reader.deserialize::<ProjectRecord>() {
            let record = record.map_err(|source| DataError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            raw.push(record);
        }

        if raw.is_empty() {
            return Err(DataError::Empty {
                path: path.to_path_buf(),
            });
        }

        let dataset = Self::from_records(raw);
        info!(
            path = %path.display(),
            samples = dataset.len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    /// Clean raw records by imputation. Exposed for tests and callers that
    /// already hold records in memory.
    pub fn from_records(raw: Vec<ProjectRecord>) -> Self {
        let size_median = median(raw.iter().filter_map(|r| r.building_size_m2));
        let cost_median = median(raw.iter().filter_map(|r| r.est_cost_usd));
        let location_mode = mode(raw.iter().filter_map(|r| r.location.as_deref()));
        let budget_mode = mode(raw.iter().filter_map(|r| r.budget_level.as_deref()));
        let combo_mode = mode(raw.iter().filter_map(|r| r.material_combo.as_deref()));

        let records = raw
            .into_iter()
            .map(|r| CleanRecord {
                building_size_m2: r.building_size_m2.unwrap_or(size_median),
                location: r.location.unwrap_or_else(|| location_mode.clone()),
                budget_level: r.budget_level.unwrap_or_else(|| budget_mode.clone()),
                material_combo: r.material_combo.unwrap_or_else(|| combo_mode.clone()),
                est_cost_usd: r.est_cost_usd.unwrap_or(cost_median),
            })
            .collect();

        Self { records }
    }

    /// The cleaned records.
    pub fn records(&self) -> &[CleanRecord] {
        &self.records
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Median of the present values; 0 when every value is missing.
fn median(values: impl Iterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = values.collect();
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Most frequent value; lexicographically smallest on ties, empty string
/// when every value is missing.
fn mode<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|(a_val, a_n), (b_val, b_n)| a_n.cmp(b_n).then(b_val.cmp(a_val)))
        .map(|(v, _)| v.to_string())
        .unwrap_or_default()
}
