//! Core types for the low-cost housing configurator.
//!
//! This crate holds the pieces every other `lchc-*` crate agrees on:
//!
//! - [`error`]: the shared error type for core operations.
//! - [`features`]: the feature-vector schema used identically at training
//!   and inference time.
//! - [`materials`]: the material taxonomy (combo names, standard categories,
//!   and the index-to-name map persisted with a trained bundle).

pub mod error;
pub mod features;
pub mod materials;

pub use error::{LchcError, Result};
pub use features::{NumericFeatures, CATEGORICAL_FEATURES, NUMERIC_FEATURES};
pub use materials::{combo_to_std_category, MaterialMap, StdCategory};
