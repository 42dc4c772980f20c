//! Predict Command Implementation
//!
//! One-shot prediction without a running server, useful for smoke tests
//! and scripting. Prints the same JSON body the HTTP endpoint returns.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use lchc_serving::{predict, PredictRequest};

/// Predict material and cost for one building
///
/// # Example
///
/// ```bash
/// lchc predict --model-dir lchc_models --size-m2 90 --location urban --budget-level low
/// ```
#[derive(Args, Debug, Clone)]
pub struct PredictCommand {
    /// Directory containing the model bundle
    #[arg(long, short = 'd', default_value = "lchc_models", env = "LCHC_MODEL_DIR")]
    pub model_dir: PathBuf,

    /// Building size in square meters
    #[arg(long)]
    pub size_m2: f64,

    /// Location category
    #[arg(long)]
    pub location: String,

    /// Budget level category
    #[arg(long, default_value = "")]
    pub budget_level: String,
}

impl PredictCommand {
    /// Run one prediction and print it as JSON.
    pub async fn run(&self) -> Result<()> {
        let request = PredictRequest::from_parts(
            Some(&self.size_m2.to_string()),
            Some(&self.location),
            Some(&self.budget_level),
        )
        .context("invalid prediction inputs")?;

        let prediction = predict(&self.model_dir, &request).context("prediction failed")?;
        println!("{}", serde_json::to_string_pretty(&prediction)?);
        Ok(())
    }
}
