//! MCP (Model Context Protocol) server support

pub mod server;
pub mod transport;
pub mod types;

pub use server::McpServer;
pub use transport::{serve, serve_stdio};
pub use types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId};
