// Weather tool backed by the Hong Kong Observatory open data API

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_enum, json_schema_object, Tool};
use anyhow::Result;
use hko_weather_core::{Capability, Dispatcher, LanguageCode, ToolRequest, WeatherError};
use std::sync::Arc;

pub const TOOL_NAME: &str = "get_weather";

/// `get_weather`: one HKO dataset per call, picked by the `type` argument
pub struct GetWeatherTool {
    dispatcher: Arc<Dispatcher>,
}

impl GetWeatherTool {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    fn failure(err: &WeatherError) -> CallToolResult {
        if err.is_client_error() {
            tracing::info!(error = %err, "Rejected weather request");
        } else {
            tracing::warn!(error = %err, status = ?err.status(), "Weather request failed");
        }

        let body = serde_json::to_string_pretty(&err.to_json()).unwrap_or_else(|_| err.to_string());
        CallToolResult::error(body)
    }
}

#[async_trait::async_trait]
impl Tool for GetWeatherTool {
    fn schema(&self) -> ToolSchema {
        let types: Vec<&str> = Capability::ALL.iter().map(|c| c.as_str()).collect();
        let type_help = Capability::ALL
            .iter()
            .map(|c| format!("{}: {}", c.as_str(), c.description()))
            .collect::<Vec<_>>()
            .join("; ");
        let languages: Vec<&str> = LanguageCode::ALL.iter().map(|l| l.param()).collect();

        ToolSchema {
            name: TOOL_NAME.to_string(),
            description: format!(
                "Get weather data from the Hong Kong Observatory. Types: {}",
                type_help
            ),
            input_schema: json_schema_object(
                serde_json::json!({
                    "type": json_schema_enum(&types, "Which weather dataset to fetch"),
                    "language": json_schema_enum(
                        &languages,
                        "Response language: en (English), tc (Traditional Chinese), sc (Simplified Chinese). Default: en"
                    ),
                    "format": json_schema_enum(
                        &["json", "text"],
                        "json returns the HKO payload unchanged, text a readable summary. Default: json"
                    )
                }),
                vec!["type"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let request = match ToolRequest::from_arguments(arguments) {
            Ok(request) => request,
            Err(e) => return Ok(Self::failure(&e)),
        };

        let output = match request.output_format() {
            Ok(output) => output,
            Err(e) => return Ok(Self::failure(&e)),
        };

        match self.dispatcher.handle(request).await {
            Ok(response) => {
                tracing::debug!(
                    capability = %response.capability,
                    language = %response.language,
                    "Weather request served"
                );
                Ok(CallToolResult::text(response.render(output)))
            }
            Err(e) => Ok(Self::failure(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hko_weather_core::DispatcherConfig;
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool_for(server: &MockServer) -> GetWeatherTool {
        let config = DispatcherConfig::with_base_url(format!("{}/weatherAPI/opendata/", server.uri()));
        GetWeatherTool::new(Arc::new(Dispatcher::new(config).unwrap()))
    }

    fn error_body(result: &CallToolResult) -> Value {
        assert!(result.is_error());
        serde_json::from_str(result.content[0].as_text()).unwrap()
    }

    #[test]
    fn test_schema_lists_types_and_languages() {
        let tool = GetWeatherTool::new(Arc::new(Dispatcher::new(DispatcherConfig::default()).unwrap()));
        let schema = tool.schema();

        assert_eq!(schema.name, "get_weather");
        assert_eq!(schema.input_schema["required"], json!(["type"]));

        let types = schema.input_schema["properties"]["type"]["enum"].as_array().unwrap();
        assert_eq!(types.len(), Capability::ALL.len());
        assert!(types.contains(&json!("current")));
        assert_eq!(
            schema.input_schema["properties"]["language"]["enum"],
            json!(["en", "tc", "sc"])
        );
    }

    #[tokio::test]
    async fn test_json_pass_through() {
        let server = MockServer::start().await;
        let payload = json!({"swt": [{"desc": "Gusty winds.", "updateTime": "2026-10-18T08:00:00+08:00"}]});

        Mock::given(method("GET"))
            .and(path("/weatherAPI/opendata/weather.php"))
            .and(query_param("dataType", "swt"))
            .and(query_param("lang", "tc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool_for(&server)
            .execute(json!({"type": "special_tip", "language": "tc"}))
            .await
            .unwrap();

        assert!(!result.is_error());
        let body: Value = serde_json::from_str(result.content[0].as_text()).unwrap();
        assert_eq!(body, payload);
    }

    #[tokio::test]
    async fn test_text_format() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("dataType", "warnsum"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let result = tool_for(&server)
            .execute(json!({"type": "warning", "format": "text"}))
            .await
            .unwrap();

        assert_eq!(result.content[0].as_text(), "No warning issued.");
    }

    #[tokio::test]
    async fn test_unknown_type_is_structured_error() {
        let server = MockServer::start().await;
        let result = tool_for(&server)
            .execute(json!({"type": "forecast_next_year"}))
            .await
            .unwrap();

        let body = error_body(&result);
        assert_eq!(body["error"], "unknown_tool");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_structured_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool_for(&server)
            .execute(json!({"type": "current"}))
            .await
            .unwrap();

        let body = error_body(&result);
        assert_eq!(body["error"], "upstream_error");
        assert_eq!(body["status"], 500);
    }

    #[tokio::test]
    async fn test_bad_format_rejected_before_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let result = tool_for(&server)
            .execute(json!({"type": "local", "format": "xml"}))
            .await
            .unwrap();

        let body = error_body(&result);
        assert_eq!(body["error"], "invalid_argument");
        assert_eq!(body["argument"], "format");
    }
}
