//! Command-line interface
//!
//! Three entry points: `serve` starts the prediction service, `predict`
//! runs the interactive form client against a running service, and
//! `inspect` prints what a bundle on disk declares.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

use crate::bundle::ModelBundle;
use crate::client::{self, ClientConfig};
use crate::server::{run_server, ServerConfig};

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}
fn muted(s: &str) -> ColoredString {
    s.truecolor(140, 140, 140)
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

#[derive(Parser)]
#[command(name = "bankmark")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bank marketing term-deposit prediction service and form client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the prediction service
    Serve {
        /// Address to bind
        #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "API_PORT", default_value_t = 5000)]
        port: u16,

        /// Model bundle file
        #[arg(short, long, env = "MODEL_PATH", default_value = "models/bundle.json")]
        model: PathBuf,
    },

    /// Fill the prospect form and request a prediction
    Predict {
        /// Prediction endpoint of a running service
        #[arg(long, env = "API_URL", default_value = "http://localhost:5000/predict")]
        url: String,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },

    /// Show what a model bundle declares
    Inspect {
        /// Model bundle file
        #[arg(short, long, env = "MODEL_PATH", default_value = "models/bundle.json")]
        model: PathBuf,
    },
}

pub async fn cmd_serve(host: &str, port: u16, model: &Path) -> anyhow::Result<()> {
    section("Bankmark Service");
    println!("  {:<10} http://{}:{}", muted("Metadata"), host, port);
    println!("  {:<10} http://{}:{}/predict", muted("Predict"), host, port);
    println!("  {:<10} {}", muted("Bundle"), model.display());
    println!();
    println!("  {}", dim("ctrl+c to stop"));
    println!();

    let config = ServerConfig {
        host: host.to_string(),
        port,
        model_path: model.to_path_buf(),
    };
    run_server(config).await
}

pub async fn cmd_predict(url: &str, timeout: u64) -> anyhow::Result<()> {
    let config = ClientConfig {
        url: url.to_string(),
        timeout_secs: timeout,
    };
    client::run_form(config).await
}

pub fn cmd_inspect(model: &Path) -> anyhow::Result<()> {
    let bundle = ModelBundle::load(model)?;

    section("Model Bundle");
    println!("  {:<14} {}", muted("Path"), model.display());
    println!("  {:<14} {}", muted("Numeric"), bundle.numeric_features.len());
    println!(
        "  {:<14} {}",
        muted("Categorical"),
        bundle.categorical_features.len()
    );
    println!(
        "  {:<14} {}",
        muted("Design width"),
        bundle.pipeline.design_width()?
    );

    section("Features");
    for name in &bundle.numeric_features {
        println!("  {:<14} {}", name, dim("numeric"));
    }
    for name in &bundle.categorical_features {
        let vocab = bundle.pipeline.vocabulary(name).map(|v| v.len()).unwrap_or(0);
        println!(
            "  {:<14} {}",
            name,
            dim(&format!("categorical, {} values", vocab))
        );
    }
    println!();

    Ok(())
}
