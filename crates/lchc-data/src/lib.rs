//! Dataset loading and feature assembly for the low-cost housing
//! configurator.
//!
//! The training pipeline flows through this crate in order:
//!
//! 1. [`dataset`]: read `data.csv`, impute missing values (column median for
//!    numerics, column mode for categoricals).
//! 2. [`reference`]: read `materials_curated.csv` and reduce it to
//!    per-category mean GWP, density, and build speed.
//! 3. [`matrix`]: join the two and assemble the design matrix, class codes,
//!    and log-cost targets.
//! 4. [`split`]: seeded shuffle into train and test index sets.

pub mod dataset;
pub mod error;
pub mod matrix;
pub mod reference;
pub mod split;

pub use dataset::{CleanRecord, Dataset, ProjectRecord};
pub use error::{DataError, Result};
pub use matrix::{hstack_features, take, take_rows, DesignMatrix};
pub use reference::{MaterialAverages, MaterialRecord, MaterialsRef};
pub use split::train_test_split;
