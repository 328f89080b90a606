//! HTTP client for the Pixabay search endpoints

use crate::config::GatewayConfig;
use crate::error::{ApiError, ConfigError, Result};
use crate::pixabay::params::{ImageSearchParams, VideoSearchParams};
use crate::pixabay::query::{self, QueryPairs};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};
use url::Url;

/// Name of the credential query parameter
const KEY_PARAM: &str = "key";

/// Which Pixabay endpoint a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixabay API client
///
/// Holds an immutable configuration and a pooled `reqwest::Client`, so one
/// instance can be shared between concurrent tool calls.
pub struct PixabayClient {
    http: Client,
    config: GatewayConfig,
}

impl PixabayClient {
    /// Create a new client
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("pixabay-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::from)?;

        Ok(Self { http, config })
    }

    /// The configured API key, or a configuration error when there is none
    pub fn api_key(&self) -> Result<&str> {
        self.config
            .api_key()
            .ok_or_else(|| ConfigError::MissingApiKey.into())
    }

    /// Search images
    pub async fn search_images(&self, params: &ImageSearchParams) -> Result<Value> {
        self.search(MediaKind::Image, query::to_query(params)?).await
    }

    /// Search videos
    pub async fn search_videos(&self, params: &VideoSearchParams) -> Result<Value> {
        self.search(MediaKind::Video, query::to_query(params)?).await
    }

    /// Perform one GET against the endpoint for `kind` and return the JSON body
    pub async fn search(&self, kind: MediaKind, query: QueryPairs) -> Result<Value> {
        let api_key = self.api_key()?;
        let url = self.build_url(kind, api_key, &query)?;

        debug!(kind = %kind, url = %redact_url(&url), "Sending Pixabay request");

        let response = self.http.get(url).send().await.map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(kind = %kind, status = status.as_u16(), "Pixabay request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body,
            }
            .into());
        }

        let body = response.text().await.map_err(ApiError::from)?;
        let payload = serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse {
            message: e.to_string(),
        })?;

        Ok(payload)
    }

    /// Build the outbound URL for `kind`
    ///
    /// Any caller-supplied `key` pair is discarded so the request carries
    /// exactly one credential.
    pub fn build_url(
        &self,
        kind: MediaKind,
        api_key: &str,
        query: &[(String, String)],
    ) -> Result<Url> {
        let endpoint = match kind {
            MediaKind::Image => &self.config.image_endpoint,
            MediaKind::Video => &self.config.video_endpoint,
        };

        let mut url = Url::parse(endpoint).map_err(|_| ConfigError::InvalidValue {
            field: format!("{}_endpoint", kind),
            value: endpoint.clone(),
        })?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(KEY_PARAM, api_key);
            for (name, value) in query.iter().filter(|(name, _)| name != KEY_PARAM) {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }
}

/// Render a URL with the credential replaced by `***`
pub fn redact_url(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == KEY_PARAM {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();

    if pairs.is_empty() {
        return redacted.to_string();
    }

    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
