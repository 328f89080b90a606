//! # pixabay-mcp Core
//!
//! Core library for pixabay-mcp - Pixabay image and video search exposed as
//! Model Context Protocol tools.
//!
//! The library holds the tool gateway (typed parameters, query building and
//! the HTTP client), the tool registry, and a JSON-RPC server with a
//! newline-delimited stdio transport.

// Core modules
pub mod config;
pub mod error;
pub mod mcp;
pub mod pixabay;
pub mod tools;

// Re-export commonly used types
pub use config::GatewayConfig;
pub use error::{Error, Result};
pub use mcp::McpServer;
pub use pixabay::PixabayClient;
pub use tools::{ToolExecutor, ToolRegistry};

use std::sync::Arc;

/// Current version of the pixabay-mcp-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a ready-to-serve MCP server from a resolved configuration
pub fn build_server(config: GatewayConfig) -> Result<McpServer> {
    let client = Arc::new(PixabayClient::new(config)?);
    let executor = ToolRegistry::default().create_executor(client);
    Ok(McpServer::new(executor).with_instructions(
        "Search royalty-free Pixabay media. Use search_images or search_videos with \
         optional filters, or get_image_by_id / get_video_by_id for a known id. \
         Results are the raw Pixabay JSON responses.",
    ))
}

/// Filter used for `--verbose`
pub const VERBOSE_FILTER: &str = "info,pixabay_mcp=debug,pixabay_mcp_core=debug";

/// Initialize tracing for the library
///
/// Logs go to stderr: stdout carries the protocol. `verbose` turns on debug
/// output for this crate and the binary only; dependencies stay at `info` so
/// their request logs cannot print the API key. Otherwise `RUST_LOG` is
/// honoured with `info` as the fallback.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
