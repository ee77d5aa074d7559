//! Dispatcher configuration.

use crate::error::{WeatherError, WeatherResult};
use crate::language::LanguageCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default HKO open data API root.
pub const DEFAULT_BASE_URL: &str = "https://data.weather.gov.hk/weatherAPI/opendata/";

/// User agent sent with every HKO request.
pub const DEFAULT_USER_AGENT: &str = concat!("hko-weather-mcp/", env!("CARGO_PKG_VERSION"));

/// Immutable settings handed to the [`Dispatcher`](crate::Dispatcher) at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Root the endpoint templates are resolved against.
    pub base_url: String,
    /// Language used when a request does not name one.
    pub default_language: LanguageCode,
    /// Upper bound for a single HKO round-trip, in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_language: LanguageCode::English,
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl DispatcherConfig {
    /// Create a configuration pointing at a different API root.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parse the base URL, making sure templates join below it.
    pub fn parsed_base_url(&self) -> WeatherResult<Url> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }

        let url = Url::parse(&raw)
            .map_err(|e| WeatherError::Config(format!("Invalid base_url '{}': {}", self.base_url, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(WeatherError::Config(format!(
                "base_url must be http or https, got: {}",
                other
            ))),
        }
    }

    /// Reject settings the dispatcher cannot run with.
    pub fn validate(&self) -> WeatherResult<()> {
        self.parsed_base_url()?;

        if self.timeout_secs == 0 {
            return Err(WeatherError::Config("timeout_secs must be at least 1".to_string()));
        }

        if self.user_agent.trim().is_empty() {
            return Err(WeatherError::Config("user_agent cannot be empty".to_string()));
        }

        Ok(())
    }
}
