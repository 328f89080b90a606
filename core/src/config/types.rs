//! Gateway configuration types
//!
//! Core only accepts a fully resolved configuration value.
//! All discovery, loading, and merging happens in CLI layer.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default Pixabay image search endpoint
pub const DEFAULT_IMAGE_ENDPOINT: &str = "https://pixabay.com/api/";

/// Default Pixabay video search endpoint
pub const DEFAULT_VIDEO_ENDPOINT: &str = "https://pixabay.com/api/videos/";

/// Default outbound request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A fully resolved gateway configuration
///
/// Built once at process start and shared read-only by every tool call.
#[derive(Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Pixabay API key; checked when a tool is invoked, not at startup
    #[serde(default)]
    pub api_key: Option<String>,

    /// Image search endpoint
    #[serde(default = "default_image_endpoint")]
    pub image_endpoint: String,

    /// Video search endpoint
    #[serde(default = "default_video_endpoint")]
    pub video_endpoint: String,

    /// Timeout applied to every outbound request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_image_endpoint() -> String {
    DEFAULT_IMAGE_ENDPOINT.to_string()
}

fn default_video_endpoint() -> String {
    DEFAULT_VIDEO_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl GatewayConfig {
    /// Create a configuration with the default endpoints
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            ..Self::default()
        }
    }

    /// Set the API key
    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override both endpoints, e.g. to point at a local test server
    pub fn with_endpoints<S: Into<String>>(mut self, image_endpoint: S, video_endpoint: S) -> Self {
        self.image_endpoint = image_endpoint.into();
        self.video_endpoint = video_endpoint.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// The API key, if one is configured and non-empty
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Whether a usable API key is present
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    ///
    /// A missing API key is deliberately not an error here: tool discovery
    /// must work without one.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("image_endpoint", &self.image_endpoint),
            ("video_endpoint", &self.video_endpoint),
        ] {
            if url::Url::parse(value).is_err() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.clone(),
                }
                .into());
            }
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            image_endpoint: default_image_endpoint(),
            video_endpoint: default_video_endpoint(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// Hand-written so the key never reaches a log line.
impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("image_endpoint", &self.image_endpoint)
            .field("video_endpoint", &self.video_endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = GatewayConfig::default();
        assert_eq!(config.image_endpoint, DEFAULT_IMAGE_ENDPOINT);
        assert_eq!(config.video_endpoint, DEFAULT_VIDEO_ENDPOINT);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(!config.has_api_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_key_is_treated_as_missing() {
        let config = GatewayConfig::new(Some("   ".to_string()));
        assert!(!config.has_api_key());

        let config = GatewayConfig::default().with_api_key("abc123");
        assert_eq!(config.api_key(), Some("abc123"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GatewayConfig::default().with_api_key("super-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_validate_rejects_bad_endpoint_and_zero_timeout() {
        let config = GatewayConfig::default().with_endpoints("not a url", DEFAULT_VIDEO_ENDPOINT);
        assert!(config.validate().is_err());

        let config = GatewayConfig::default().with_timeout_secs(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: GatewayConfig = serde_json::from_str(r#"{"api_key": "k"}"#).unwrap();
        assert_eq!(config.api_key(), Some("k"));
        assert_eq!(config.image_endpoint, DEFAULT_IMAGE_ENDPOINT);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
