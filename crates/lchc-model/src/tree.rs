//! CART decision trees, the shared building block for forests and boosting.
//!
//! Trees are grown greedily: at every node a subset of features is sampled,
//! each candidate threshold (midpoints between adjacent distinct values) is
//! scored, and the split with the best impurity decrease wins. Classification
//! uses weighted Gini impurity so balanced class weights flow through
//! naturally; regression uses variance reduction.

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Feature-subset policy at each split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxFeatures {
    /// Consider every feature (regression default).
    All,
    /// Consider `sqrt(n_features)` features (classification default).
    Sqrt,
    /// Consider `log2(n_features)` features.
    Log2,
}

impl MaxFeatures {
    fn count(self, n_features: usize) -> usize {
        let k = match self {
            MaxFeatures::All => n_features,
            MaxFeatures::Sqrt => (n_features as f64).sqrt().floor() as usize,
            MaxFeatures::Log2 => (n_features as f64).log2().floor() as usize,
        };
        k.clamp(1, n_features)
    }
}

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth; `None` grows until nodes are pure.
    pub max_depth: Option<usize>,
    /// Minimum samples needed to attempt a split.
    pub min_samples_split: usize,
    /// Feature subset policy.
    pub max_features: MaxFeatures,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            max_features: MaxFeatures::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A fitted decision tree.
///
/// For regression the leaf value is the mean target of the samples that
/// reached it; for classification it is the weighted-majority class index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    n_features: usize,
}

impl DecisionTree {
    /// Fit a regression tree on the given rows.
    pub fn fit_regression(
        x: &Array2<f64>,
        y: &[f64],
        rows: &[usize],
        config: &TreeConfig,
        rng: &mut StdRng,
    ) -> Result<Self> {
        check_inputs(x, y.len(), rows)?;
        let mut builder = TreeBuilder {
            x,
            y,
            weights: None,
            n_classes: 0,
            config,
            rng,
            nodes: Vec::new(),
        };
        builder.build(rows.to_vec(), 0);
        Ok(Self {
            nodes: builder.nodes,
            n_features: x.ncols(),
        })
    }

    /// Fit a classification tree on the given rows.
    ///
    /// `y` holds class indices in `0..n_classes`; `weights` holds one sample
    /// weight per row of `x`.
    pub fn fit_classification(
        x: &Array2<f64>,
        y: &[usize],
        weights: &[f64],
        n_classes: usize,
        rows: &[usize],
        config: &TreeConfig,
        rng: &mut StdRng,
    ) -> Result<Self> {
        check_inputs(x, y.len(), rows)?;
        if n_classes == 0 {
            return Err(ModelError::invalid_config("n_classes must be positive"));
        }
        let y_f64: Vec<f64> = y.iter().map(|&c| c as f64).collect();
        let mut builder = TreeBuilder {
            x,
            y: &y_f64,
            weights: Some(weights),
            n_classes,
            config,
            rng,
            nodes: Vec::new(),
        };
        builder.build(rows.to_vec(), 0);
        Ok(Self {
            nodes: builder.nodes,
            n_features: x.ncols(),
        })
    }

    /// Predict the leaf value for one feature row.
    pub fn predict_row(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }

    /// Predict leaf values for every row of a matrix.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        if x.ncols() != self.n_features {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features,
                actual: x.ncols(),
            });
        }
        Ok(x.rows().into_iter().map(|r| self.predict_row(r)).collect())
    }

    /// Number of nodes in the fitted tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}

fn check_inputs(x: &Array2<f64>, targets: usize, rows: &[usize]) -> Result<()> {
    if x.nrows() == 0 || rows.is_empty() {
        return Err(ModelError::EmptyInput);
    }
    if x.nrows() != targets {
        return Err(ModelError::LengthMismatch {
            rows: x.nrows(),
            targets,
        });
    }
    Ok(())
}

struct TreeBuilder<'a> {
    x: &'a Array2<f64>,
    /// Targets; class indices stored as f64 for classification.
    y: &'a [f64],
    /// Per-sample weights; `Some` marks classification mode.
    weights: Option<&'a [f64]>,
    n_classes: usize,
    config: &'a TreeConfig,
    rng: &'a mut StdRng,
    nodes: Vec<Node>,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    gain: f64,
}

impl TreeBuilder<'_> {
    fn build(&mut self, rows: Vec<usize>, depth: usize) -> usize {
        let leaf_value = self.leaf_value(&rows);
        let impurity = self.impurity(&rows);

        let depth_exhausted = self
            .config
            .max_depth
            .is_some_and(|limit| depth >= limit);
        if depth_exhausted
            || rows.len() < self.config.min_samples_split
            || impurity <= 1e-12
        {
            return self.push_leaf(leaf_value);
        }

        let best = match self.best_split(&rows, impurity) {
            Some(best) if best.gain > 1e-12 => best,
            _ => return self.push_leaf(leaf_value),
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&i| self.x[[i, best.feature]] <= best.threshold);

        // A degenerate partition can only happen with pathological
        // thresholds; fall back to a leaf rather than recurse forever.
        if left_rows.is_empty() || right_rows.is_empty() {
            return self.push_leaf(leaf_value);
        }

        let node_idx = self.nodes.len();
        self.nodes.push(Node::Leaf { value: leaf_value });
        let left = self.build(left_rows, depth + 1);
        let right = self.build(right_rows, depth + 1);
        self.nodes[node_idx] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        node_idx
    }

    fn push_leaf(&mut self, value: f64) -> usize {
        self.nodes.push(Node::Leaf { value });
        self.nodes.len() - 1
    }

    fn leaf_value(&self, rows: &[usize]) -> f64 {
        match self.weights {
            Some(weights) => {
                let mut class_weight = vec![0.0; self.n_classes];
                for &i in rows {
                    class_weight[self.y[i] as usize] += weights[i];
                }
                argmax(&class_weight) as f64
            }
            None => {
                let sum: f64 = rows.iter().map(|&i| self.y[i]).sum();
                sum / rows.len() as f64
            }
        }
    }

    fn impurity(&self, rows: &[usize]) -> f64 {
        match self.weights {
            Some(weights) => {
                let mut class_weight = vec![0.0; self.n_classes];
                let mut total = 0.0;
                for &i in rows {
                    class_weight[self.y[i] as usize] += weights[i];
                    total += weights[i];
                }
                gini(&class_weight, total)
            }
            None => {
                let n = rows.len() as f64;
                let sum: f64 = rows.iter().map(|&i| self.y[i]).sum();
                let sum_sq: f64 = rows.iter().map(|&i| self.y[i] * self.y[i]).sum();
                (sum_sq / n - (sum / n).powi(2)).max(0.0)
            }
        }
    }

    fn best_split(&mut self, rows: &[usize], parent_impurity: f64) -> Option<BestSplit> {
        let n_features = self.x.ncols();
        let k = self.config.max_features.count(n_features);
        let candidates = sample(self.rng, n_features, k);

        let mut best: Option<BestSplit> = None;
        for feature in candidates {
            let split = match self.weights {
                Some(_) => self.sweep_classification(rows, feature, parent_impurity),
                None => self.sweep_regression(rows, feature, parent_impurity),
            };
            if let Some(split) = split {
                let better = best.as_ref().map_or(true, |b| split.gain > b.gain);
                if better {
                    best = Some(split);
                }
            }
        }
        best
    }

    /// Sweeps sorted feature values, tracking class-weight totals left of
    /// the cut, and scores the weighted Gini of every boundary between
    /// distinct values.
    fn sweep_classification(
        &self,
        rows: &[usize],
        feature: usize,
        parent_impurity: f64,
    ) -> Option<BestSplit> {
        let weights = self.weights?;

        let mut ordered: Vec<usize> = rows.to_vec();
        ordered.sort_by(|&a, &b| {
            self.x[[a, feature]]
                .partial_cmp(&self.x[[b, feature]])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut total_weight = 0.0;
        let mut total_counts = vec![0.0; self.n_classes];
        for &i in &ordered {
            total_counts[self.y[i] as usize] += weights[i];
            total_weight += weights[i];
        }

        let mut left_counts = vec![0.0; self.n_classes];
        let mut left_weight = 0.0;
        let mut best: Option<BestSplit> = None;

        for w in 0..ordered.len() - 1 {
            let i = ordered[w];
            left_counts[self.y[i] as usize] += weights[i];
            left_weight += weights[i];

            let v = self.x[[i, feature]];
            let v_next = self.x[[ordered[w + 1], feature]];
            if v == v_next {
                continue;
            }

            let right_weight = total_weight - left_weight;
            let right_counts: Vec<f64> = total_counts
                .iter()
                .zip(&left_counts)
                .map(|(t, l)| t - l)
                .collect();

            let weighted = (left_weight * gini(&left_counts, left_weight)
                + right_weight * gini(&right_counts, right_weight))
                / total_weight;
            let gain = parent_impurity - weighted;

            if best.as_ref().map_or(true, |b| gain > b.gain) {
                best = Some(BestSplit {
                    feature,
                    threshold: (v + v_next) / 2.0,
                    gain,
                });
            }
        }
        best
    }

    /// Same sweep for regression, tracking running sum and sum of squares
    /// to score variance reduction at each boundary.
    fn sweep_regression(
        &self,
        rows: &[usize],
        feature: usize,
        parent_impurity: f64,
    ) -> Option<BestSplit> {
        let mut ordered: Vec<usize> = rows.to_vec();
        ordered.sort_by(|&a, &b| {
            self.x[[a, feature]]
                .partial_cmp(&self.x[[b, feature]])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let n = ordered.len() as f64;
        let total_sum: f64 = ordered.iter().map(|&i| self.y[i]).sum();
        let total_sum_sq: f64 = ordered.iter().map(|&i| self.y[i] * self.y[i]).sum();

        let mut left_sum = 0.0;
        let mut left_sum_sq = 0.0;
        let mut best: Option<BestSplit> = None;

        for w in 0..ordered.len() - 1 {
            let i = ordered[w];
            left_sum += self.y[i];
            left_sum_sq += self.y[i] * self.y[i];

            let v = self.x[[i, feature]];
            let v_next = self.x[[ordered[w + 1], feature]];
            if v == v_next {
                continue;
            }

            let n_left = (w + 1) as f64;
            let n_right = n - n_left;
            let var_left = (left_sum_sq / n_left - (left_sum / n_left).powi(2)).max(0.0);
            let right_sum = total_sum - left_sum;
            let right_sum_sq = total_sum_sq - left_sum_sq;
            let var_right = (right_sum_sq / n_right - (right_sum / n_right).powi(2)).max(0.0);

            let weighted = (n_left * var_left + n_right * var_right) / n;
            let gain = parent_impurity - weighted;

            if best.as_ref().map_or(true, |b| gain > b.gain) {
                best = Some(BestSplit {
                    feature,
                    threshold: (v + v_next) / 2.0,
                    gain,
                });
            }
        }
        best
    }
}

fn gini(class_weight: &[f64], total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    let sum_sq: f64 = class_weight.iter().map(|w| (w / total).powi(2)).sum();
    1.0 - sum_sq
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_regression_tree_fits_step_function() {
        let x = array![[1.0], [2.0], [3.0], [10.0], [11.0], [12.0]];
        let y = [0.0, 0.0, 0.0, 5.0, 5.0, 5.0];
        let rows: Vec<usize> = (0..6).collect();
        let tree =
            DecisionTree::fit_regression(&x, &y, &rows, &TreeConfig::default(), &mut rng()).unwrap();

        let preds = tree.predict(&array![[2.0], [11.0]]).unwrap();
        assert_eq!(preds, vec![0.0, 5.0]);
    }

    #[test]
    fn test_classification_tree_separates_classes() {
        let x = array![[0.0, 0.0], [0.2, 0.1], [0.1, 0.3], [5.0, 5.0], [5.2, 4.9], [4.8, 5.1]];
        let y = [0, 0, 0, 1, 1, 1];
        let weights = [1.0; 6];
        let rows: Vec<usize> = (0..6).collect();
        let tree = DecisionTree::fit_classification(
            &x,
            &y,
            &weights,
            2,
            &rows,
            &TreeConfig::default(),
            &mut rng(),
        )
        .unwrap();

        let preds = tree.predict(&array![[0.1, 0.1], [5.0, 5.0]]).unwrap();
        assert_eq!(preds, vec![0.0, 1.0]);
    }

    #[test]
    fn test_max_depth_limits_tree() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [5.0], [6.0], [7.0], [8.0]];
        let y = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let rows: Vec<usize> = (0..8).collect();
        let config = TreeConfig {
            max_depth: Some(1),
            ..TreeConfig::default()
        };
        let tree = DecisionTree::fit_regression(&x, &y, &rows, &config, &mut rng()).unwrap();
        // Depth 1 means one split and two leaves at most.
        assert!(tree.num_nodes() <= 3);
    }

    #[test]
    fn test_pure_node_becomes_leaf() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = [4.0, 4.0, 4.0];
        let rows: Vec<usize> = (0..3).collect();
        let tree =
            DecisionTree::fit_regression(&x, &y, &rows, &TreeConfig::default(), &mut rng()).unwrap();
        assert_eq!(tree.num_nodes(), 1);
        assert_eq!(tree.predict(&array![[9.0]]).unwrap(), vec![4.0]);
    }

    #[test]
    fn test_class_weights_shift_majority() {
        // One heavily weighted minority sample dominates the leaf vote.
        let x = array![[0.0], [0.0], [0.0]];
        let y = [0, 0, 1];
        let weights = [1.0, 1.0, 10.0];
        let rows: Vec<usize> = (0..3).collect();
        let tree = DecisionTree::fit_classification(
            &x,
            &y,
            &weights,
            2,
            &rows,
            &TreeConfig::default(),
            &mut rng(),
        )
        .unwrap();
        assert_eq!(tree.predict_row(array![0.0].view()), 1.0);
    }

    #[test]
    fn test_feature_width_checked_on_predict() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let y = [0.0, 1.0];
        let rows = vec![0, 1];
        let tree =
            DecisionTree::fit_regression(&x, &y, &rows, &TreeConfig::default(), &mut rng()).unwrap();
        assert!(matches!(
            tree.predict(&array![[1.0]]),
            Err(ModelError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_max_features_count() {
        assert_eq!(MaxFeatures::All.count(9), 9);
        assert_eq!(MaxFeatures::Sqrt.count(9), 3);
        assert_eq!(MaxFeatures::Log2.count(9), 3);
        assert_eq!(MaxFeatures::Sqrt.count(1), 1);
    }
}
