//! Tools listing command

use anyhow::Result;
use pixabay_mcp_core::mcp::types::ListToolsResult;
use pixabay_mcp_core::{GatewayConfig, PixabayClient, ToolRegistry};
use std::sync::Arc;
use tracing::info;

/// Show available tools
///
/// Needs no API key: the listing never touches the network.
pub async fn tools_command(json: bool) -> Result<()> {
    info!("Listing available tools");

    let registry = ToolRegistry::default();

    if json {
        let client = Arc::new(PixabayClient::new(GatewayConfig::default())?);
        let listing = ListToolsResult {
            tools: registry.create_executor(client).descriptors(),
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("🛠️  Available Tools\n");

    for tool_name in registry.list_tools() {
        if let Some((name, description)) = registry.get_tool_info(tool_name) {
            println!("📦 {}", name);
            println!("   {}\n", description);
        }
    }

    println!("💡 Set PIXABAY_API_KEY before calling these tools.");

    Ok(())
}
