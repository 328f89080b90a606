//! Minimal configuration module for pixabay-mcp core
//!
//! Only exports pure data types. All loading logic is in CLI layer.

pub mod types;

pub use types::{
    GatewayConfig, DEFAULT_IMAGE_ENDPOINT, DEFAULT_TIMEOUT_SECS, DEFAULT_VIDEO_ENDPOINT,
};
