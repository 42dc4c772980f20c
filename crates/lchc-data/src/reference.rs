//! Curated materials reference table and per-category averages.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use lchc_core::StdCategory;

use crate::error::{DataError, Result};

/// One row of `materials_curated.csv`.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialRecord {
    /// Standard material category the row belongs to.
    pub std_category: String,
    /// Global warming potential, kgCO2e per kg.
    pub gwp_kgco2e_per_kg: Option<f64>,
    /// Density, kg per m3.
    pub density_kg_per_m3: Option<f64>,
    /// Relative build speed score.
    pub build_speed: Option<f64>,
}

/// Mean material properties for one standard category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialAverages {
    pub avg_gwp: f64,
    pub avg_density: f64,
    pub avg_speed: f64,
}

/// Per-category property averages derived from the curated reference table.
#[derive(Debug, Clone)]
pub struct MaterialsRef {
    averages: HashMap<StdCategory, MaterialAverages>,
}

impl MaterialsRef {
    /// Load the curated table and compute per-category means over the
    /// rows with a recognized `std_category`. Rows with a missing
    /// property are skipped for that property's mean.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .from_path(path)
            .map_err(|source| DataError::Csv {
                path: path.to_path_buf(),
                source,
            })?;

        let mut records = Vec::new();
        for record in reader.deserialize::<MaterialRecord>() {
            let record = record.map_err(|source| DataError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(DataError::Empty {
                path: path.to_path_buf(),
            });
        }

        let materials = Self::from_records(&records);
        info!(
            path = %path.display(),
            categories = materials.averages.len(),
            "Loaded materials reference"
        );
        Ok(materials)
    }

    /// Compute per-category means from in-memory records.
    pub fn from_records(records: &[MaterialRecord]) -> Self {
        let mut sums: HashMap<StdCategory, ([f64; 3], [usize; 3])> = HashMap::new();
        for record in records {
            let Some(category) = StdCategory::parse(&record.std_category) else {
                continue;
            };
            let (totals, counts) = sums.entry(category).or_insert(([0.0; 3], [0; 3]));
            for (slot, value) in [
                record.gwp_kgco2e_per_kg,
                record.density_kg_per_m3,
                record.build_speed,
            ]
            .into_iter()
            .enumerate()
            {
                if let Some(v) = value {
                    totals[slot] += v;
                    counts[slot] += 1;
                }
            }
        }

        let averages = sums
            .into_iter()
            .map(|(category, (totals, counts))| {
                let mean = |slot: usize| {
                    if counts[slot] == 0 {
                        0.0
                    } else {
                        totals[slot] / counts[slot] as f64
                    }
                };
                (
                    category,
                    MaterialAverages {
                        avg_gwp: mean(0),
                        avg_density: mean(1),
                        avg_speed: mean(2),
                    },
                )
            })
            .collect();

        Self { averages }
    }

    /// Averages for a category, or `MissingCategory` if the curated table
    /// had no rows for it.
    pub fn averages_for(&self, category: StdCategory) -> Result<MaterialAverages> {
        self.averages
            .get(&category)
            .copied()
            .ok_or_else(|| DataError::MissingCategory {
                category: category.as_str().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str, gwp: Option<f64>, density: Option<f64>, speed: Option<f64>) -> MaterialRecord {
        MaterialRecord {
            std_category: category.to_string(),
            gwp_kgco2e_per_kg: gwp,
            density_kg_per_m3: density,
            build_speed: speed,
        }
    }

    #[test]
    fn test_per_category_means() {
        let records = vec![
            record("timber", Some(0.4), Some(500.0), Some(0.9)),
            record("timber", Some(0.6), Some(700.0), Some(0.7)),
            record("concrete", Some(0.2), Some(2400.0), Some(0.5)),
        ];
        let materials = MaterialsRef::from_records(&records);
        let timber = materials.averages_for(StdCategory::Timber).unwrap();
        assert!((timber.avg_gwp - 0.5).abs() < 1e-12);
        assert!((timber.avg_density - 600.0).abs() < 1e-12);
        assert!((timber.avg_speed - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_missing_property_rows_are_skipped_per_property() {
        let records = vec![
            record("concrete", Some(0.2), None, Some(0.4)),
            record("concrete", Some(0.4), Some(2400.0), None),
        ];
        let materials = MaterialsRef::from_records(&records);
        let concrete = materials.averages_for(StdCategory::Concrete).unwrap();
        assert!((concrete.avg_gwp - 0.3).abs() < 1e-12);
        assert!((concrete.avg_density - 2400.0).abs() < 1e-12);
        assert!((concrete.avg_speed - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_category_rows_are_ignored() {
        let records = vec![record("steel", Some(2.0), Some(7800.0), Some(0.6))];
        let materials = MaterialsRef::from_records(&records);
        let err = materials.averages_for(StdCategory::Timber).unwrap_err();
        assert!(matches!(err, DataError::MissingCategory { .. }));
    }
}
