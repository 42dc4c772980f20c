//! Random forests: bagged CART trees for classification and regression.
//!
//! Each tree is grown on a bootstrap resample with its own RNG derived from
//! the forest seed and tree index, so fitting is deterministic regardless of
//! how rayon schedules the work.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::tree::{DecisionTree, MaxFeatures, TreeConfig};

/// Hyperparameters shared by both forest flavors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees.
    pub n_estimators: usize,
    /// Growth limits for each tree.
    pub tree: TreeConfig,
    /// Reweight samples inversely to class frequency (classifier only).
    pub balanced_class_weights: bool,
    /// Seed for bootstrap and feature sampling.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 300,
            tree: TreeConfig::default(),
            balanced_class_weights: false,
            seed: 42,
        }
    }
}

impl ForestConfig {
    /// The defaults used for the material classifier: 300 trees, sqrt
    /// feature sampling, balanced class weights.
    pub fn classifier(seed: u64) -> Self {
        Self {
            n_estimators: 300,
            tree: TreeConfig {
                max_features: MaxFeatures::Sqrt,
                ..TreeConfig::default()
            },
            balanced_class_weights: true,
            seed,
        }
    }

    /// The defaults used for the cost regressor: 300 trees, every feature
    /// considered at each split.
    pub fn regressor(seed: u64) -> Self {
        Self {
            n_estimators: 300,
            tree: TreeConfig::default(),
            balanced_class_weights: false,
            seed,
        }
    }
}

/// A fitted random-forest classifier predicting class indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    trees: Vec<DecisionTree>,
    n_classes: usize,
    config: ForestConfig,
}

impl RandomForestClassifier {
    /// Fit the forest on class indices in `0..n_classes`.
    pub fn fit(x: &Array2<f64>, y: &[usize], config: &ForestConfig) -> Result<Self> {
        if x.nrows() == 0 {
            return Err(ModelError::EmptyInput);
        }
        if x.nrows() != y.len() {
            return Err(ModelError::LengthMismatch {
                rows: x.nrows(),
                targets: y.len(),
            });
        }
        if config.n_estimators == 0 {
            return Err(ModelError::invalid_config("n_estimators must be positive"));
        }

        let n_classes = y.iter().copied().max().map_or(0, |m| m + 1);
        let weights = sample_weights(y, n_classes, config.balanced_class_weights);

        let trees: Vec<DecisionTree> = (0..config.n_estimators)
            .into_par_iter()
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(t as u64));
                let rows = bootstrap(x.nrows(), &mut rng);
                DecisionTree::fit_classification(
                    x,
                    y,
                    &weights,
                    n_classes,
                    &rows,
                    &config.tree,
                    &mut rng,
                )
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            trees,
            n_classes,
            config: *config,
        })
    }

    /// Predict a class index per row by majority vote.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Vec<usize>> {
        if self.trees.is_empty() {
            return Err(ModelError::NotFitted);
        }

        let mut votes = vec![vec![0usize; self.n_classes]; x.nrows()];
        for tree in &self.trees {
            for (i, pred) in tree.predict(x)?.into_iter().enumerate() {
                votes[i][pred as usize] += 1;
            }
        }

        Ok(votes
            .into_iter()
            .map(|counts| {
                let mut best = 0;
                for (c, &n) in counts.iter().enumerate() {
                    if n > counts[best] {
                        best = c;
                    }
                }
                best
            })
            .collect())
    }

    /// Number of classes seen at fit time.
    pub fn num_classes(&self) -> usize {
        self.n_classes
    }

    /// Number of fitted trees.
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }
}

/// A fitted random-forest regressor predicting the mean over trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    trees: Vec<DecisionTree>,
    config: ForestConfig,
}

impl RandomForestRegressor {
    /// Fit the forest on continuous targets.
    pub fn fit(x: &Array2<f64>, y: &[f64], config: &ForestConfig) -> Result<Self> {
        if x.nrows() == 0 {
            return Err(ModelError::EmptyInput);
        }
        if x.nrows() != y.len() {
            return Err(ModelError::LengthMismatch {
                rows: x.nrows(),
                targets: y.len(),
            });
        }
        if config.n_estimators == 0 {
            return Err(ModelError::invalid_config("n_estimators must be positive"));
        }

        let trees: Vec<DecisionTree> = (0..config.n_estimators)
            .into_par_iter()
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(t as u64));
                let rows = bootstrap(x.nrows(), &mut rng);
                DecisionTree::fit_regression(x, y, &rows, &config.tree, &mut rng)
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            trees,
            config: *config,
        })
    }

    /// Predict the mean tree output per row.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        if self.trees.is_empty() {
            return Err(ModelError::NotFitted);
        }

        let mut sums = vec![0.0; x.nrows()];
        for tree in &self.trees {
            for (i, pred) in tree.predict(x)?.into_iter().enumerate() {
                sums[i] += pred;
            }
        }
        let n = self.trees.len() as f64;
        Ok(sums.into_iter().map(|s| s / n).collect())
    }

    /// Number of fitted trees.
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }
}

/// Bootstrap resample of `0..n` with replacement.
fn bootstrap(n: usize, rng: &mut StdRng) -> Vec<usize> {
    (0..n).map(|_| rng.gen_range(0..n)).collect()
}

/// Per-sample weights; `n / (k * count_c)` per class when balanced.
fn sample_weights(y: &[usize], n_classes: usize, balanced: bool) -> Vec<f64> {
    if !balanced || n_classes == 0 {
        return vec![1.0; y.len()];
    }
    let mut counts = vec![0usize; n_classes];
    for &c in y {
        counts[c] += 1;
    }
    let n = y.len() as f64;
    let k = n_classes as f64;
    y.iter()
        .map(|&c| {
            if counts[c] == 0 {
                1.0
            } else {
                n / (k * counts[c] as f64)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn blobs() -> (Array2<f64>, Vec<usize>) {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..20 {
            let jitter = (i % 5) as f64 * 0.05;
            if i % 2 == 0 {
                rows.extend_from_slice(&[0.0 + jitter, 0.5 - jitter]);
                labels.push(0);
            } else {
                rows.extend_from_slice(&[5.0 + jitter, 5.5 - jitter]);
                labels.push(1);
            }
        }
        (Array2::from_shape_vec((20, 2), rows).unwrap(), labels)
    }

    #[test]
    fn test_classifier_separates_blobs() {
        let (x, y) = blobs();
        let config = ForestConfig {
            n_estimators: 25,
            ..ForestConfig::classifier(42)
        };
        let clf = RandomForestClassifier::fit(&x, &y, &config).unwrap();

        let preds = clf.predict(&array![[0.1, 0.4], [5.1, 5.4]]).unwrap();
        assert_eq!(preds, vec![0, 1]);
        assert_eq!(clf.num_classes(), 2);
        assert_eq!(clf.num_trees(), 25);
    }

    #[test]
    fn test_classifier_is_deterministic_for_fixed_seed() {
        let (x, y) = blobs();
        let config = ForestConfig {
            n_estimators: 10,
            ..ForestConfig::classifier(7)
        };
        let a = RandomForestClassifier::fit(&x, &y, &config).unwrap();
        let b = RandomForestClassifier::fit(&x, &y, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_regressor_approximates_step() {
        let x = array![[1.0], [2.0], [3.0], [10.0], [11.0], [12.0]];
        let y = [0.0, 0.0, 0.0, 8.0, 8.0, 8.0];
        let config = ForestConfig {
            n_estimators: 30,
            ..ForestConfig::regressor(42)
        };
        let reg = RandomForestRegressor::fit(&x, &y, &config).unwrap();

        let preds = reg.predict(&array![[2.0], [11.0]]).unwrap();
        assert!(preds[0] < 2.0, "low plateau predicted {}", preds[0]);
        assert!(preds[1] > 6.0, "high plateau predicted {}", preds[1]);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let x = array![[1.0], [2.0]];
        let err = RandomForestRegressor::fit(&x, &[1.0], &ForestConfig::regressor(1)).unwrap_err();
        assert!(matches!(err, ModelError::LengthMismatch { .. }));
    }

    #[test]
    fn test_balanced_weights() {
        let w = sample_weights(&[0, 0, 0, 1], 2, true);
        // class 0: 4 / (2 * 3), class 1: 4 / (2 * 1)
        assert!((w[0] - 4.0 / 6.0).abs() < 1e-12);
        assert!((w[3] - 2.0).abs() < 1e-12);
    }
}
