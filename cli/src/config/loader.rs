//! CLI configuration loader for pixabay-mcp
//!
//! Layers, lowest priority first:
//! 1. Built-in defaults
//! 2. Config file: --config path, or $XDG_CONFIG_HOME/pixabay-mcp/config.toml
//! 3. Environment variables prefixed with `PIXABAY_` (e.g. `PIXABAY_API_KEY`)
//! 4. Flag overrides

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use pixabay_mcp_core::config::{
    GatewayConfig, DEFAULT_IMAGE_ENDPOINT, DEFAULT_TIMEOUT_SECS, DEFAULT_VIDEO_ENDPOINT,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix of the environment variables read by the loader
pub const ENV_PREFIX: &str = "PIXABAY";

/// CLI configuration loader
#[derive(Debug, Default)]
pub struct CliConfigLoader {
    /// Override config file path
    config_override: Option<PathBuf>,
    /// Flag overrides
    timeout_override: Option<u64>,
    /// Replaces the process environment; used by tests
    env_source: Option<HashMap<String, String>>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set config file override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set request timeout override
    pub fn with_timeout_override(mut self, timeout_secs: u64) -> Self {
        self.timeout_override = Some(timeout_secs);
        self
    }

    /// Read environment variables from `vars` instead of the process environment
    pub fn with_env_source(mut self, vars: HashMap<String, String>) -> Self {
        self.env_source = Some(vars);
        self
    }

    /// Load and resolve configuration
    pub fn load(&self) -> Result<GatewayConfig> {
        let mut builder = Config::builder()
            .set_default("image_endpoint", DEFAULT_IMAGE_ENDPOINT)?
            .set_default("video_endpoint", DEFAULT_VIDEO_ENDPOINT)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?;

        match &self.config_override {
            Some(path) => {
                let path = expand_path(path);
                debug!(path = %path.display(), "Loading config file");
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(path) = default_config_path().filter(|p| p.exists()) {
                    debug!(path = %path.display(), "Loading config file");
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(self.env_source.clone()),
        );

        if let Some(timeout_secs) = self.timeout_override {
            builder = builder.set_override("timeout_secs", timeout_secs as i64)?;
        }

        let config: GatewayConfig = builder
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        config.validate().context("Invalid configuration")?;

        Ok(config)
    }
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pixabay-mcp").join("config.toml"))
}

fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}
