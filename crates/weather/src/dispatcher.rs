//! Tool dispatch: tool name and arguments in, HKO JSON out.

use crate::catalog::{self, Capability, EndpointSpec};
use crate::config::DispatcherConfig;
use crate::error::{WeatherError, WeatherResult};
use crate::format;
use crate::language::{self, LanguageCode};
use crate::transport::HttpTransport;
use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::{debug, info};
use url::Url;

/// Arguments that map onto the upstream `lang` query parameter.
const LANGUAGE_ARGS: [&str; 2] = ["language", "lang"];

/// Arguments consumed locally and never sent upstream.
const CONTROL_ARGS: [&str; 2] = ["type", "format"];

/// One incoming tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRequest {
    /// Capability identifier, e.g. `current` or `nine_day`.
    pub tool_name: String,
    pub arguments: Map<String, Value>,
}

impl ToolRequest {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: Map::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    /// Build a request from `get_weather` arguments, where `type` names the capability.
    pub fn from_arguments(arguments: Value) -> WeatherResult<Self> {
        let arguments = match arguments {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => {
                return Err(WeatherError::invalid_argument(
                    "arguments",
                    "must be a JSON object",
                ))
            }
        };

        let tool_name = match arguments.get("type") {
            Some(Value::String(name)) => name.clone(),
            Some(_) => return Err(WeatherError::invalid_argument("type", "must be a string")),
            None => return Err(WeatherError::invalid_argument("type", "is required")),
        };

        Ok(Self {
            tool_name,
            arguments,
        })
    }

    fn string_argument(&self, name: &str) -> WeatherResult<Option<&str>> {
        match self.arguments.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(WeatherError::invalid_argument(name, "must be a string")),
        }
    }

    /// Requested output format, `json` unless the caller asks for `text`.
    pub fn output_format(&self) -> WeatherResult<OutputFormat> {
        match self.string_argument("format")? {
            None => Ok(OutputFormat::Json),
            Some(raw) => OutputFormat::from_str(raw),
        }
    }
}

/// How a [`WeatherResponse`] is presented to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// HKO payload as-is
    #[default]
    Json,
    /// Human-readable summary
    Text,
}

impl FromStr for OutputFormat {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(WeatherError::invalid_argument(
                "format",
                format!("Unknown format '{}'. Valid: json, text", other),
            )),
        }
    }
}

/// Parsed HKO payload plus what was asked for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherResponse {
    pub capability: Capability,
    pub language: LanguageCode,
    pub url: String,
    pub data: Value,
}

impl WeatherResponse {
    /// Render the payload in the requested format.
    pub fn render(&self, output: OutputFormat) -> String {
        match output {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&self.data).unwrap_or_else(|_| self.data.to_string())
            }
            OutputFormat::Text => format::render(self.capability, &self.data),
        }
    }
}

/// A request after catalog lookup and argument validation, before any I/O.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub endpoint: &'static EndpointSpec,
    pub language: LanguageCode,
    pub url: Url,
}

/// Maps tool requests onto HKO endpoints.
///
/// Holds only immutable state, so one instance can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: DispatcherConfig,
    base_url: Url,
    transport: HttpTransport,
}

impl Dispatcher {
    pub fn new(config: DispatcherConfig) -> WeatherResult<Self> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;
        let transport = HttpTransport::new(&config)?;

        info!(
            base_url = %base_url,
            default_language = %config.default_language,
            timeout_secs = config.timeout_secs,
            "Weather dispatcher ready"
        );

        Ok(Self {
            config,
            base_url,
            transport,
        })
    }

    /// Final request URL for an endpoint in a given language.
    pub fn build_url(&self, endpoint: &EndpointSpec, language: LanguageCode) -> WeatherResult<Url> {
        let mut url = self.base_url.join(endpoint.url_template).map_err(|e| {
            WeatherError::Config(format!(
                "Cannot join '{}' onto {}: {}",
                endpoint.url_template, self.base_url, e
            ))
        })?;
        url.query_pairs_mut().append_pair("lang", language.param());
        Ok(url)
    }

    /// Resolve endpoint, language and URL without touching the network.
    pub fn resolve(&self, request: &ToolRequest) -> WeatherResult<ResolvedRequest> {
        let capability = Capability::from_str(&request.tool_name)?;
        let endpoint = catalog::lookup(capability)
            .ok_or_else(|| WeatherError::UnknownTool(request.tool_name.clone()))?;

        let mut requested_language = None;
        for (name, value) in &request.arguments {
            let name = name.as_str();
            if CONTROL_ARGS.contains(&name) {
                continue;
            }
            if LANGUAGE_ARGS.contains(&name) {
                if !endpoint.allows("lang") {
                    return Err(WeatherError::invalid_argument(
                        name,
                        format!("not accepted by the {} endpoint", capability),
                    ));
                }
                let value = match value {
                    Value::Null => None,
                    Value::String(s) => Some(s.as_str()),
                    _ => return Err(WeatherError::invalid_argument(name, "must be a string")),
                };
                // `language` wins over the `lang` shorthand
                if requested_language.is_none() || name == "language" {
                    requested_language = value.or(requested_language);
                }
                continue;
            }
            return Err(WeatherError::invalid_argument(
                name,
                format!(
                    "not accepted by the {} endpoint. Allowed: type, language, format",
                    capability
                ),
            ));
        }

        let language = match requested_language {
            Some(raw) => language::resolve(Some(raw)),
            None => self.config.default_language,
        };

        let url = self.build_url(endpoint, language)?;

        Ok(ResolvedRequest {
            endpoint,
            language,
            url,
        })
    }

    /// Run one tool request: a single GET, parsed as JSON and returned unchanged.
    pub async fn handle(&self, request: ToolRequest) -> WeatherResult<WeatherResponse> {
        let resolved = self.resolve(&request)?;
        let capability = resolved.endpoint.id;

        debug!(
            capability = %capability,
            language = %resolved.language,
            url = %resolved.url,
            "Dispatching weather request"
        );

        let data = self.transport.get_json(&resolved.url).await?;

        Ok(WeatherResponse {
            capability,
            language: resolved.language,
            url: resolved.url.to_string(),
            data,
        })
    }
}
