//! Bankmark - Main Entry Point
//!
//! Term-deposit subscription prediction: HTTP service, form client, and
//! bundle inspection in one binary.

use bankmark::cli::{cmd_inspect, cmd_predict, cmd_serve, Cli, Commands};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bankmark=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port, model } => {
            cmd_serve(&host, port, &model).await?;
        }
        Commands::Predict { url, timeout } => {
            cmd_predict(&url, timeout).await?;
        }
        Commands::Inspect { model } => {
            cmd_inspect(&model)?;
        }
    }

    Ok(())
}
