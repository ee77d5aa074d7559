use anyhow::{Context, Result};
use hko_weather_core::{resolve, DispatcherConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File-level configuration (`hko-weather.toml`)
///
/// ```toml
/// [hko]
/// base_url = "https://data.weather.gov.hk/weatherAPI/opendata/"
/// default_language = "tc"
/// timeout_secs = 15
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpConfig {
    #[serde(default)]
    pub hko: DispatcherConfig,
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub language: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl McpConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        if !config_path.exists() {
            tracing::info!(
                path = %config_path.display(),
                "Configuration file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read configuration file {}", config_path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file {}", config_path.display()))?;

        tracing::info!(path = %config_path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Command line and environment win over the file
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(base_url) = overrides.base_url {
            self.hko.base_url = base_url;
        }
        if let Some(language) = overrides.language {
            self.hko.default_language = resolve(Some(&language));
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.hko.timeout_secs = timeout_secs;
        }
        self
    }
}
