//! HTTP prediction service for the low-cost housing configurator.
//!
//! [`predictor`] validates query parameters and turns one request into a
//! material recommendation plus a cost estimate; [`server`] wires that
//! into an axum router and a long-running listener. The model bundle is
//! reloaded from disk per request so retraining takes effect immediately.

pub mod error;
pub mod predictor;
pub mod server;

pub use error::{Result, ServingError};
pub use predictor::{predict, PredictRequest, Prediction};
pub use server::{build_router, serve, AppState};
