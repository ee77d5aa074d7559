//! Error types for HKO weather dispatch.

use serde_json::{json, Value};

/// Result type for dispatch operations.
pub type WeatherResult<T> = Result<T, WeatherError>;

/// Errors surfaced to the caller of a weather tool.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// Tool name does not match any catalog entry.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Argument is not accepted by the resolved endpoint.
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// HKO could not be reached or returned an unusable response.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Invalid dispatcher configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failures talking to the HKO API. Never retried.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Network failure or timeout.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HKO answered with a non-success status.
    #[error("HKO returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not valid JSON.
    #[error("Invalid JSON from HKO: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl WeatherError {
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::Upstream(_) => "upstream_error",
            Self::Config(_) => "config_error",
        }
    }

    /// Upstream HTTP status, if HKO produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream(UpstreamError::Status { status, .. }) => Some(*status),
            Self::Upstream(UpstreamError::Http(e)) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the caller sent something this server cannot serve.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnknownTool(_) | Self::InvalidArgument { .. })
    }

    /// Structured error object handed back to the MCP host.
    pub fn to_json(&self) -> Value {
        let mut value = json!({
            "error": self.kind(),
            "message": self.to_string(),
        });
        if let Some(status) = self.status() {
            value["status"] = json!(status);
        }
        if let Self::InvalidArgument { argument, .. } = self {
            value["argument"] = json!(argument);
        }
        value
    }
}
