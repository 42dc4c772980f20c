//! Min-max scaling for the numeric feature block.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Scales each column to `[0, 1]` based on the range seen at fit time.
///
/// A constant column scales to 0 for every value instead of dividing by
/// zero. Values outside the fitted range are not clipped, so an
/// inference-time size larger than anything in the training data maps
/// above 1; the tree ensembles downstream are insensitive to that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    mins: Vec<f64>,
    ranges: Vec<f64>,
}

impl MinMaxScaler {
    /// Fit the scaler on a matrix, recording per-column min and range.
    pub fn fit(x: &Array2<f64>) -> Result<Self> {
        if x.nrows() == 0 {
            return Err(ModelError::EmptyInput);
        }

        let mut mins = Vec::with_capacity(x.ncols());
        let mut ranges = Vec::with_capacity(x.ncols());
        for col in x.columns() {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for &v in col.iter() {
                min = min.min(v);
                max = max.max(v);
            }
            mins.push(min);
            ranges.push(max - min);
        }

        Ok(Self { mins, ranges })
    }

    /// Transform a matrix with the fitted parameters.
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.mins.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.mins.len(),
                actual: x.ncols(),
            });
        }

        let mut out = x.clone();
        for (j, mut col) in out.columns_mut().into_iter().enumerate() {
            let min = self.mins[j];
            let range = self.ranges[j];
            for v in col.iter_mut() {
                *v = if range == 0.0 { 0.0 } else { (*v - min) / range };
            }
        }
        Ok(out)
    }

    /// Number of columns the scaler was fitted on.
    pub fn num_features(&self) -> usize {
        self.mins.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_fit_transform_scales_to_unit_range() {
        let x = array![[0.0, 10.0], [5.0, 20.0], [10.0, 30.0]];
        let scaler = MinMaxScaler::fit(&x).unwrap();
        let scaled = scaler.transform(&x).unwrap();

        assert_eq!(scaled[[0, 0]], 0.0);
        assert_eq!(scaled[[1, 0]], 0.5);
        assert_eq!(scaled[[2, 0]], 1.0);
        assert_eq!(scaled[[0, 1]], 0.0);
        assert_eq!(scaled[[2, 1]], 1.0);
    }

    #[test]
    fn test_constant_column_scales_to_zero() {
        let x = array![[7.0], [7.0], [7.0]];
        let scaler = MinMaxScaler::fit(&x).unwrap();
        let scaled = scaler.transform(&x).unwrap();
        for i in 0..3 {
            assert_eq!(scaled[[i, 0]], 0.0);
        }
    }

    #[test]
    fn test_out_of_range_values_are_not_clipped() {
        let x = array![[0.0], [10.0]];
        let scaler = MinMaxScaler::fit(&x).unwrap();
        let scaled = scaler.transform(&array![[20.0]]).unwrap();
        assert_eq!(scaled[[0, 0]], 2.0);
    }

    #[test]
    fn test_width_mismatch_rejected() {
        let x = array![[0.0, 1.0], [2.0, 3.0]];
        let scaler = MinMaxScaler::fit(&x).unwrap();
        let err = scaler.transform(&array![[1.0]]).unwrap_err();
        assert!(matches!(err, ModelError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_empty_input_rejected() {
        let x = Array2::<f64>::zeros((0, 2));
        assert!(matches!(
            MinMaxScaler::fit(&x),
            Err(ModelError::EmptyInput)
        ));
    }
}
