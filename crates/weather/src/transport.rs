//! HTTP transport to the HKO open data API.

use crate::config::DispatcherConfig;
use crate::error::{UpstreamError, WeatherError, WeatherResult};
use reqwest::{header, Client};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Longest upstream error body kept in an [`UpstreamError::Status`].
const MAX_ERROR_BODY: usize = 2_048;

/// Single-attempt JSON GET client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &DispatcherConfig) -> WeatherResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| WeatherError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch `url` and parse the body as JSON. No retries.
    pub async fn get_json(&self, url: &Url) -> Result<Value, UpstreamError> {
        debug!(url = %url, "GET request");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HKO request failed");
            UpstreamError::Http(e)
        })?;

        let status = response.status();

        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "HKO returned error status");
            // Body read failures still report the status
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let value = serde_json::from_str(&body).map_err(|e| {
            warn!(url = %url, error = %e, "HKO returned invalid JSON");
            UpstreamError::InvalidJson(e)
        })?;

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport() -> HttpTransport {
        HttpTransport::new(&DispatcherConfig::default()).unwrap()
    }

    fn url(server: &MockServer, p: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), p)).unwrap()
    }

    #[tokio::test]
    async fn test_get_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather.php"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"swt": []})))
            .expect(1)
            .mount(&server)
            .await;

        let value = transport().get_json(&url(&server, "/weather.php")).await.unwrap();
        assert_eq!(value, json!({"swt": []}));
    }

    #[tokio::test]
    async fn test_sends_user_agent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(header("user-agent", crate::config::DEFAULT_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let result = transport().get_json(&url(&server, "/weather.php")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such dataType"))
            .mount(&server)
            .await;

        match transport().get_json(&url(&server, "/weather.php")).await {
            Err(UpstreamError::Status { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "no such dataType");
            }
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let result = transport().get_json(&url(&server, "/weather.php")).await;
        assert!(matches!(result, Err(UpstreamError::InvalidJson(_))));
    }

    #[tokio::test]
    async fn test_error_body_truncated() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("x".repeat(10_000)))
            .mount(&server)
            .await;

        match transport().get_json(&url(&server, "/weather.php")).await {
            Err(UpstreamError::Status { body, .. }) => assert_eq!(body.len(), MAX_ERROR_BODY),
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_survives_truncated_body() {
        use tokio::io::AsyncWriteExt;
        use tokio::net::TcpListener;

        // Promises 100 bytes, sends 5, then hangs up
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = tokio::io::AsyncReadExt::read(&mut socket, &mut request).await;
            socket
                .write_all(b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 100\r\n\r\nshort")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let url = Url::parse(&format!("http://{}/weather.php", addr)).unwrap();
        match transport().get_json(&url).await {
            Err(UpstreamError::Status { status, .. }) => assert_eq!(status, 503),
            other => panic!("Expected Status error, got {:?}", other),
        }
    }
}
