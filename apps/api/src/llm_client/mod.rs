//! LLM client: the single point of entry for all Gemini API calls.
//!
//! One `generateContent` request per call. No retries: a failed call is reported
//! to the caller, which decides how to surface it.
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::Config;

pub mod response;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Error)]
pub enum GeminiError {
    /// Transport failure: connect, timeout, or body read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Thin client over `POST /v1beta/models/<model>:generateContent`.
/// Base URL, model, key and timeout are all injected so tests can point it at a mock server.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, GeminiError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
            model,
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, GeminiError> {
        Self::new(
            config.gemini_api_key.clone(),
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
            config.gemini_timeout,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Sends the prompt and returns the raw response body on a 2xx status.
    ///
    /// Non-2xx statuses become `GeminiError::Api` with the upstream body attached.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, GeminiError> {
        let request_body = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(redact_url)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Error calling Gemini API: HTTP status {status}, response body: {body}");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(redact_url)?;
        debug!("Gemini call succeeded: {} bytes received", body.len());
        Ok(body)
    }
}

/// The request URL carries the API key as a query parameter, so it never goes into errors.
fn redact_url(err: reqwest::Error) -> GeminiError {
    GeminiError::Http(err.without_url())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout: Duration) -> GeminiClient {
        GeminiClient::new(
            "test-key".to_string(),
            server.uri(),
            DEFAULT_MODEL.to_string(),
            timeout,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_content_sends_expected_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .and(query_param("key", "test-key"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "contents": [{ "parts": [{ "text": "write my resume" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"candidates\":[]}"))
            .expect(1)
            .mount(&server)
            .await;

        let body = client_for(&server, Duration::from_secs(5))
            .generate_content("write my resume")
            .await
            .unwrap();
        assert_eq!(body, "{\"candidates\":[]}");
    }

    #[tokio::test]
    async fn test_non_success_status_returns_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::from_secs(5))
            .generate_content("prompt")
            .await
            .unwrap_err();
        match err {
            GeminiError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_upstream_hits_configured_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::from_millis(100))
            .generate_content("prompt")
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::Http(ref e) if e.is_timeout()));
    }

    #[tokio::test]
    async fn test_transport_error_does_not_expose_api_key() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = GeminiClient::new(
            "SECRET-KEY-123".to_string(),
            format!("http://{addr}"),
            DEFAULT_MODEL.to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        let err = client.generate_content("prompt").await.unwrap_err();

        assert!(matches!(err, GeminiError::Http(_)));
        assert!(!err.to_string().contains("SECRET-KEY-123"));
        assert!(!format!("{err:?}").contains("SECRET-KEY-123"));
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let client = GeminiClient::new(
            "k".to_string(),
            "http://localhost:9/".to_string(),
            "gemini-test".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9/v1beta/models/gemini-test:generateContent"
        );
    }
}
