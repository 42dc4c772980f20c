//! Serve Command Implementation
//!
//! Starts the HTTP prediction service against an existing model bundle.

use anyhow::{Context, Result};
use clap::Args;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing::info;

use lchc_serving::{serve, AppState};

/// Serve predictions over HTTP
///
/// # Example
///
/// ```bash
/// lchc serve --model-dir lchc_models --port 8000
/// ```
#[derive(Args, Debug, Clone)]
pub struct ServeCommand {
    /// Directory containing the model bundle to serve
    #[arg(long, short = 'd', default_value = "lchc_models", env = "LCHC_MODEL_DIR")]
    pub model_dir: PathBuf,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "LCHC_HOST")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', default_value = "8000", env = "LCHC_PORT")]
    pub port: u16,
}

impl ServeCommand {
    /// Run the HTTP service until interrupted.
    pub async fn run(&self) -> Result<()> {
        // Fail fast on a bad bundle rather than on the first request.
        lchc_artifacts::BundleReader::new(&self.model_dir)
            .read_manifest()
            .with_context(|| {
                format!("no usable model bundle in {}", self.model_dir.display())
            })?;

        let addr = SocketAddr::new(self.host, self.port);
        info!(addr = %addr, "Starting prediction service");
        serve(addr, AppState::new(&self.model_dir))
            .await
            .context("prediction service failed")?;
        Ok(())
    }
}
