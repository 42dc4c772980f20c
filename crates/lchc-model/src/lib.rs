//! Estimators and preprocessing for the low-cost housing configurator.
//!
//! This crate implements the model zoo the training pipeline needs:
//!
//! - [`scaler`]: min-max scaling for the numeric feature block.
//! - [`encoder`]: one-hot encoding for the categorical block, tolerant of
//!   unknown categories at inference time.
//! - [`tree`]: CART decision trees, the shared building block.
//! - [`forest`]: random-forest classifier and regressor.
//! - [`gbdt`]: gradient-boosting regressor on squared loss.
//! - [`ensemble`]: mean-voting regressor combining forest and boosting.
//! - [`metrics`]: accuracy, MAE, RMSE, and R².
//!
//! All fitted estimators derive serde so a bundle can be persisted and
//! reloaded byte-for-byte; given the same seed and data, fitting is
//! deterministic even when trees are grown in parallel.

pub mod encoder;
pub mod ensemble;
pub mod error;
pub mod forest;
pub mod gbdt;
pub mod metrics;
pub mod scaler;
pub mod tree;

pub use encoder::OneHotEncoder;
pub use ensemble::{CostRegressor, VotingRegressor};
pub use error::{ModelError, Result};
pub use forest::{ForestConfig, RandomForestClassifier, RandomForestRegressor};
pub use gbdt::{GradientBoostingConfig, GradientBoostingRegressor};
pub use metrics::{accuracy_score, mean_absolute_error, r2_score, root_mean_squared_error};
pub use scaler::MinMaxScaler;
pub use tree::{DecisionTree, MaxFeatures, TreeConfig};
