//! lchc - Command-line interface for training and serving the low-cost
//! housing configurator.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lchc_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("lchc=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(cmd) => cmd.run().await?,
        Commands::Serve(cmd) => cmd.run().await?,
        Commands::Predict(cmd) => cmd.run().await?,
    }

    Ok(())
}
