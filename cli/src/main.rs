//! # pixabay-mcp
//!
//! Model Context Protocol server exposing Pixabay image and video search.
//!
//! ## Usage
//!
//! - `pixabay-mcp` - Serve MCP over stdin/stdout
//! - `pixabay-mcp tools` - Show available tools
//!
//! The API key is read from `PIXABAY_API_KEY` (or a config file). Without it
//! the server still starts and lists its tools; calls report a configuration
//! error.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

use crate::commands::{serve_command, tools_command};
use crate::config::CliConfigLoader;

/// pixabay-mcp - Pixabay search tools for MCP clients
#[derive(Parser)]
#[command(name = "pixabay-mcp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pixabay image and video search exposed as MCP tools")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path (serve only)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Timeout for each Pixabay request, in seconds (serve only)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdin/stdout (default)
    Serve,

    /// Show available tools
    Tools {
        /// Print the tools/list payload as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(timeout_secs) = cli.timeout_secs {
        loader = loader.with_timeout_override(timeout_secs);
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    pixabay_mcp_core::init_tracing(cli.verbose);

    match &cli.command {
        Some(Commands::Tools { json }) => {
            if cli.config.is_some() || cli.timeout_secs.is_some() {
                bail!("--config and --timeout-secs only apply to serve");
            }
            tools_command(*json).await
        }
        Some(Commands::Serve) | None => serve_command(build_config_loader(&cli)).await,
    }
}
