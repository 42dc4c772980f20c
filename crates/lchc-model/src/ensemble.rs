//! Mean-voting ensemble combining the cost regressors.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::forest::RandomForestRegressor;
use crate::gbdt::GradientBoostingRegressor;

/// A regressor that can sit inside the voting ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CostRegressor {
    /// A bagged random forest.
    Forest(RandomForestRegressor),
    /// A gradient-boosting machine.
    Boosting(GradientBoostingRegressor),
}

impl CostRegressor {
    /// Predict with the wrapped estimator.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        match self {
            CostRegressor::Forest(reg) => reg.predict(x),
            CostRegressor::Boosting(reg) => reg.predict(x),
        }
    }
}

/// Averages the predictions of its named members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingRegressor {
    members: Vec<(String, CostRegressor)>,
}

impl VotingRegressor {
    /// Build an ensemble from named members.
    pub fn new(members: Vec<(String, CostRegressor)>) -> Result<Self> {
        if members.is_empty() {
            return Err(ModelError::invalid_config(
                "voting ensemble needs at least one member",
            ));
        }
        Ok(Self { members })
    }

    /// Predict the unweighted mean of the member predictions.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        let mut sums = vec![0.0; x.nrows()];
        for (_, member) in &self.members {
            for (s, p) in sums.iter_mut().zip(member.predict(x)?) {
                *s += p;
            }
        }
        let n = self.members.len() as f64;
        Ok(sums.into_iter().map(|s| s / n).collect())
    }

    /// Names of the members, in voting order.
    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(|(name, _)| name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::ForestConfig;
    use crate::gbdt::GradientBoostingConfig;
    use ndarray::array;

    #[test]
    fn test_empty_ensemble_rejected() {
        assert!(matches!(
            VotingRegressor::new(Vec::new()),
            Err(ModelError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_vote_is_mean_of_members() {
        let x = array![[1.0], [2.0], [3.0], [10.0], [11.0], [12.0]];
        let y = [0.0, 0.0, 0.0, 8.0, 8.0, 8.0];

        let rf_config = ForestConfig {
            n_estimators: 10,
            ..ForestConfig::regressor(42)
        };
        let gb_config = GradientBoostingConfig {
            n_estimators: 50,
            subsample: 1.0,
            ..GradientBoostingConfig::default()
        };
        let rf = RandomForestRegressor::fit(&x, &y, &rf_config).unwrap();
        let gb = GradientBoostingRegressor::fit(&x, &y, &gb_config).unwrap();

        let rf_preds = rf.predict(&x).unwrap();
        let gb_preds = gb.predict(&x).unwrap();

        let ensemble = VotingRegressor::new(vec![
            ("rf".to_string(), CostRegressor::Forest(rf)),
            ("gb".to_string(), CostRegressor::Boosting(gb)),
        ])
        .unwrap();
        assert_eq!(ensemble.member_names(), vec!["rf", "gb"]);

        let preds = ensemble.predict(&x).unwrap();
        for i in 0..x.nrows() {
            let expected = (rf_preds[i] + gb_preds[i]) / 2.0;
            assert!((preds[i] - expected).abs() < 1e-12);
        }
    }
}
