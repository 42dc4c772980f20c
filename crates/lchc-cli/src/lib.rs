//! Command-line interface for the low-cost housing configurator.
//!
//! This crate provides the `lchc` binary:
//!
//! - **Train**: fit the material classifier and cost regressor from CSV
//!   inputs and write the model bundle.
//! - **Serve**: run the HTTP prediction service against a bundle.
//! - **Predict**: one-shot prediction from the command line.
//!
//! # Example
//!
//! ```bash
//! # Train from the bundled CSVs
//! lchc train --data data.csv --materials materials_curated.csv --model-dir lchc_models
//!
//! # Serve predictions
//! lchc serve --model-dir lchc_models --port 8000
//!
//! # Predict without a server
//! lchc predict --model-dir lchc_models --size-m2 90 --location urban --budget-level low
//! ```

pub mod commands;

use clap::{Parser, Subcommand};

pub use commands::{PredictCommand, ServeCommand, TrainCommand};

/// lchc - low-cost housing configurator
///
/// Trains material and cost models from project data and serves
/// predictions over HTTP.
#[derive(Parser, Debug)]
#[command(name = "lchc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train models from CSV data and write a bundle
    Train(TrainCommand),

    /// Serve predictions over HTTP
    Serve(ServeCommand),

    /// Predict material and cost for one building
    Predict(PredictCommand),
}

/// Result type alias for CLI operations
pub type CliResult<T> = anyhow::Result<T>;
