use crate::shared::error::ApiError;
use crate::shared::{ApiResult, Result};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Connection settings shared by both API clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    /// Base URL without a trailing slash, e.g. `http://localhost:8000`
    pub base_url: String,
    pub timeout: Duration,
}

impl HttpSettings {
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
    const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Time allowed to establish a connection, capped below the request timeout
    pub fn connect_timeout(&self) -> Duration {
        self.timeout.min(Self::MAX_CONNECT_TIMEOUT)
    }
}

/// Builds the reqwest client used by the adapters
pub fn build_client(settings: &HttpSettings) -> Result<reqwest::Client> {
    let version = env!("CARGO_PKG_VERSION");
    let user_agent = format!("arkitecto/{}", version);
    let client = reqwest::Client::builder()
        .timeout(settings.timeout)
        .connect_timeout(settings.connect_timeout())
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Sends a request and turns every failure into a typed [`ApiError`]
///
/// A non-success status is an application error carrying the server's
/// `detail` (or `error`) string when the body provides one.
pub async fn send(request: RequestBuilder) -> ApiResult<Response> {
    let response = request.send().await.map_err(transport_error)?;
    let status = response.status();
    debug!(status = status.as_u16(), url = %response.url(), "response received");

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Application {
        status: status.as_u16(),
        message: status.to_string(),
        detail: extract_detail(&body),
    })
}

/// Sends a request and decodes a JSON success body
pub async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
    let response = send(request).await?;
    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
        message: e.to_string(),
    })
}

/// Sends a request and returns the raw success body
pub async fn send_bytes(request: RequestBuilder) -> ApiResult<Vec<u8>> {
    let response = send(request).await?;
    let bytes = response.bytes().await.map_err(transport_error)?;
    Ok(bytes.to_vec())
}

/// Classifies a reqwest failure.
///
/// Connect failures (a connect timeout included) mean no server was reached.
/// A timeout after connecting is reported separately; the server is up but
/// slow. Anything else happened while reading an answer.
pub fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_connect() || (err.is_request() && !err.is_timeout()) {
        ApiError::Network {
            message: err.to_string(),
        }
    } else if err.is_timeout() {
        ApiError::Timeout {
            message: err.to_string(),
        }
    } else {
        ApiError::Decode {
            message: err.to_string(),
        }
    }
}

/// Server-supplied human-readable reason, if the body is JSON with one
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["detail", "error"].iter().find_map(|key| match value.get(key)? {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Null => None,
        // FastAPI validation errors arrive as a list of objects
        other @ (Value::Array(_) | Value::Object(_)) => Some(other.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_trim_trailing_slash() {
        let settings = HttpSettings::new("http://localhost:8000/", Duration::from_secs(5));
        assert_eq!(settings.base_url, "http://localhost:8000");
        assert_eq!(settings.url("/api/v1/projects"), "http://localhost:8000/api/v1/projects");
    }

    #[test]
    fn test_connect_timeout_is_capped() {
        let slow = HttpSettings::new("http://localhost:8000", Duration::from_secs(60));
        assert_eq!(slow.connect_timeout(), Duration::from_secs(10));

        let fast = HttpSettings::new("http://localhost:8000", Duration::from_secs(3));
        assert_eq!(fast.connect_timeout(), Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_slow_answer_is_timeout_not_network() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "online"}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let settings = HttpSettings::new(server.uri(), Duration::from_millis(200));
        let client = build_client(&settings).unwrap();
        let err = send(client.get(settings.url("/"))).await.unwrap_err();

        assert!(matches!(err, ApiError::Timeout { .. }));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_extract_detail_prefers_detail() {
        let body = r#"{"success": false, "error": "quota", "detail": "Not authorized to edit this project"}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("Not authorized to edit this project")
        );
    }

    #[test]
    fn test_extract_detail_falls_back_to_error() {
        let body = r#"{"success": false, "error": "Límite de cuota alcanzado"}"#;
        assert_eq!(extract_detail(body).as_deref(), Some("Límite de cuota alcanzado"));
    }

    #[test]
    fn test_extract_detail_structured() {
        let body = r#"{"detail": [{"loc": ["body", "title"], "msg": "field required"}]}"#;
        let detail = extract_detail(body).unwrap();
        assert!(detail.contains("field required"));
    }

    #[test]
    fn test_extract_detail_absent() {
        assert!(extract_detail("<html>Bad Gateway</html>").is_none());
        assert!(extract_detail(r#"{"detail": null}"#).is_none());
        assert!(extract_detail(r#"{"detail": "  "}"#).is_none());
        assert!(extract_detail(r#"{"status": "error"}"#).is_none());
    }
}
