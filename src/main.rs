//! design-critic CLI
//!
//! Runs the HTTP server (default) or a one-shot website analysis printed as
//! JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};
use design_critic::{build_pipeline, server, AppConfig};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "design-critic")]
#[command(about = "Critique a website's CSS design with an LLM")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Analyze one website and print the result as JSON
    Analyze {
        /// URL to analyze
        #[arg(short, long)]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load .env before reading configuration.
    dotenvy::dotenv().ok();
    let mut config = AppConfig::from_env()?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            let pipeline = Arc::new(build_pipeline(&config));
            server::run(&config, pipeline).await?;
        }

        Commands::Analyze { url } => {
            info!("Analyzing: {}", url);
            let pipeline = build_pipeline(&config);
            let result = pipeline.analyze_website(&url).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
