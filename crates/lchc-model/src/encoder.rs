//! One-hot encoding for the categorical feature block.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// One-hot encoder over string categories.
///
/// Categories are stored sorted per column, so the output column order is a
/// function of the data alone. Unknown categories at transform time encode
/// to an all-zero block rather than an error; the serving side relies on
/// this when a request names a location the training data never saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    categories: Vec<Vec<String>>,
}

impl OneHotEncoder {
    /// Fit the encoder on rows of categorical values.
    ///
    /// Every row must have the same number of columns.
    pub fn fit(rows: &[Vec<String>]) -> Result<Self> {
        let first = rows.first().ok_or(ModelError::EmptyInput)?;
        let n_cols = first.len();

        let mut categories: Vec<Vec<String>> = vec![Vec::new(); n_cols];
        for row in rows {
            if row.len() != n_cols {
                return Err(ModelError::DimensionMismatch {
                    expected: n_cols,
                    actual: row.len(),
                });
            }
            for (j, value) in row.iter().enumerate() {
                if !categories[j].contains(value) {
                    categories[j].push(value.clone());
                }
            }
        }
        for cats in &mut categories {
            cats.sort();
        }

        Ok(Self { categories })
    }

    /// Transform rows into the dense one-hot matrix.
    pub fn transform(&self, rows: &[Vec<String>]) -> Result<Array2<f64>> {
        let width = self.num_output_features();
        let mut out = Array2::<f64>::zeros((rows.len(), width));

        for (i, row) in rows.iter().enumerate() {
            if row.len() != self.categories.len() {
                return Err(ModelError::DimensionMismatch {
                    expected: self.categories.len(),
                    actual: row.len(),
                });
            }
            let mut offset = 0;
            for (j, value) in row.iter().enumerate() {
                // Unknown values leave the whole block at zero.
                if let Ok(pos) = self.categories[j].binary_search(value) {
                    out[[i, offset + pos]] = 1.0;
                }
                offset += self.categories[j].len();
            }
        }
        Ok(out)
    }

    /// Total width of the one-hot block.
    pub fn num_output_features(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    /// Number of input columns the encoder was fitted on.
    pub fn num_input_features(&self) -> usize {
        self.categories.len()
    }

    /// The fitted categories of a column, in output order.
    pub fn categories(&self, column: usize) -> &[String] {
        &self.categories[column]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[[&str; 2]]) -> Vec<Vec<String>> {
        values
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_fit_sorts_categories() {
        let enc = OneHotEncoder::fit(&rows(&[["urban", "low"], ["rural", "high"]])).unwrap();
        assert_eq!(enc.categories(0), ["rural", "urban"]);
        assert_eq!(enc.categories(1), ["high", "low"]);
        assert_eq!(enc.num_output_features(), 4);
    }

    #[test]
    fn test_transform_known_values() {
        let enc = OneHotEncoder::fit(&rows(&[["urban", "low"], ["rural", "high"]])).unwrap();
        let x = enc.transform(&rows(&[["urban", "high"]])).unwrap();
        // Columns: [rural, urban, high, low]
        assert_eq!(x.row(0).to_vec(), vec![0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_unknown_value_encodes_to_zeros() {
        let enc = OneHotEncoder::fit(&rows(&[["urban", "low"], ["rural", "high"]])).unwrap();
        let x = enc.transform(&rows(&[["coastal", "low"]])).unwrap();
        assert_eq!(x.row(0).to_vec(), vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_column_count_mismatch_rejected() {
        let enc = OneHotEncoder::fit(&rows(&[["urban", "low"]])).unwrap();
        let bad = vec![vec!["urban".to_string()]];
        assert!(matches!(
            enc.transform(&bad),
            Err(ModelError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            OneHotEncoder::fit(&[]),
            Err(ModelError::EmptyInput)
        ));
    }
}
