//! Error types and handling for pixabay-mcp core

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pixabay-mcp core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Upstream API errors
    #[error("Pixabay API error: {0}")]
    Api(#[from] ApiError),

    /// Tool lookup and parameter errors
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("PIXABAY_API_KEY is not set")]
    MissingApiKey,

    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },
}

/// Errors reported by, or while talking to, the Pixabay API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{status} {status_text} - {body}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("request failed: {message}")]
    Network { message: String },

    #[error("invalid response body: {message}")]
    InvalidResponse { message: String },
}

/// Tool execution errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {name}")]
    NotFound { name: String },

    #[error("Invalid tool parameters: {message}")]
    InvalidParameters { message: String },
}

impl ToolError {
    pub fn invalid<S: Into<String>>(message: S) -> Self {
        ToolError::InvalidParameters {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        let err = err.without_url();
        let message = if err.is_timeout() {
            format!("timed out: {}", err)
        } else {
            err.to_string()
        };
        ApiError::Network { message }
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Generic(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mentions_code_and_body() {
        let err: Error = ApiError::Status {
            status: 429,
            status_text: "Too Many Requests".to_string(),
            body: "API rate limit exceeded".to_string(),
        }
        .into();

        let text = err.to_string();
        assert!(text.contains("429"));
        assert!(text.contains("Too Many Requests"));
        assert!(text.contains("API rate limit exceeded"));
    }

    #[test]
    fn test_unknown_tool_message() {
        let err: Error = ToolError::NotFound {
            name: "delete_image".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Unknown tool: delete_image");
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let err: Error = ConfigError::MissingApiKey.into();
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
