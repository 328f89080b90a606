//! Stdio server command

use crate::config::CliConfigLoader;
use anyhow::{Context, Result};
use pixabay_mcp_core::mcp::serve_stdio;
use std::sync::Arc;
use tracing::{info, warn};

/// Load configuration and serve MCP on stdin/stdout until stdin closes
pub async fn serve_command(config_loader: CliConfigLoader) -> Result<()> {
    let config = config_loader.load()?;

    if !config.has_api_key() {
        warn!("PIXABAY_API_KEY is not set; tools can be listed but every call will fail");
    }

    info!(
        image_endpoint = %config.image_endpoint,
        video_endpoint = %config.video_endpoint,
        timeout_secs = config.timeout_secs,
        "Starting pixabay-mcp {}",
        pixabay_mcp_core::VERSION
    );

    let server = pixabay_mcp_core::build_server(config).context("Failed to create server")?;

    serve_stdio(Arc::new(server))
        .await
        .context("MCP server terminated with an error")
}
