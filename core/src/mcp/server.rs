//! JSON-RPC method dispatch for the MCP server

use crate::mcp::types::*;
use crate::tools::{ToolCall, ToolExecutor};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// MCP server exposing a tool executor
pub struct McpServer {
    executor: ToolExecutor,
    info: Implementation,
    instructions: Option<String>,
}

impl McpServer {
    /// Create a new server around `executor`
    pub fn new(executor: ToolExecutor) -> Self {
        Self {
            executor,
            info: Implementation {
                name: "pixabay-mcp".to_string(),
                version: crate::VERSION.to_string(),
            },
            instructions: None,
        }
    }

    /// Set the instructions returned from `initialize`
    pub fn with_instructions<S: Into<String>>(mut self, instructions: S) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Handle one raw message line
    ///
    /// Returns `None` for notifications, which get no response.
    pub async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Received unparseable message");
                return Some(JsonRpcResponse::error(
                    None,
                    JsonRpcError::parse_error(format!("Parse error: {}", e)),
                ));
            }
        };

        // Salvage the id so an invalid request can still be answered.
        let id = value
            .get("id")
            .cloned()
            .and_then(|id| serde_json::from_value::<RequestId>(id).ok());

        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!("Invalid request: {}", e)),
            )),
        }
    }

    /// Handle a parsed request or notification
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != JSON_RPC_VERSION {
            return Some(JsonRpcResponse::error(
                request.id,
                JsonRpcError::invalid_request(format!(
                    "Unsupported jsonrpc version: {}",
                    request.jsonrpc
                )),
            ));
        }

        if request.is_notification() {
            debug!(method = %request.method, "Received notification");
            return None;
        }

        debug!(method = %request.method, "Received request");

        let id = request.id.clone();
        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(json!({})),
            "tools/list" => to_result(&ListToolsResult {
                tools: self.executor.descriptors(),
            }),
            "tools/call" => self.call_tool(request.params).await,
            "resources/list" => to_result(&ListResourcesResult::default()),
            "prompts/list" => to_result(&ListPromptsResult::default()),
            method => Err(JsonRpcError::method_not_found(method)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams = match params {
            Some(params) => serde_json::from_value(params)
                .map_err(|e| JsonRpcError::invalid_params(e.to_string()))?,
            None => InitializeParams::default(),
        };

        let protocol_version = params
            .protocol_version
            .filter(|requested| SUPPORTED_PROTOCOL_VERSIONS.contains(&requested.as_str()))
            .unwrap_or_else(|| LATEST_PROTOCOL_VERSION.to_string());

        if let Some(client) = &params.client_info {
            info!(
                client = %client.name,
                version = %client.version,
                protocol = %protocol_version,
                "Client initialized"
            );
        }

        to_result(&InitializeResult {
            protocol_version,
            capabilities: ServerCapabilities::default(),
            server_info: self.info.clone(),
            instructions: self.instructions.clone(),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| JsonRpcError::invalid_params("Missing params for tools/call"))
            .and_then(|params| {
                serde_json::from_value(params)
                    .map_err(|e| JsonRpcError::invalid_params(e.to_string()))
            })?;

        let call = ToolCall::new(params.name, params.arguments.unwrap_or(Value::Null));
        let result = self.executor.execute(call).await;

        to_result(&CallToolResult::from(result))
    }
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
