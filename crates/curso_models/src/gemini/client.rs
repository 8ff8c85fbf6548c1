//! HTTP client for the Gemini `generateContent` endpoint.

use super::conversions;
use super::dto::GeminiResponse;
use async_trait::async_trait;
use curso_core::{GenerateRequest, GenerateResponse};
use curso_error::{CursoResult, UpstreamError, UpstreamErrorKind};
use curso_interface::GenerationDriver;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Gemini REST client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Public Gemini API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";

    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key
    /// * `model` - Default model for requests that do not name one
    /// * `timeout` - Per-request HTTP deadline
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` when the key is blank, or a transport error if
    /// the HTTP client cannot be constructed.
    #[instrument(skip(api_key))]
    pub fn new(api_key: String, model: String, timeout: Duration) -> CursoResult<Self> {
        if api_key.trim().is_empty() {
            return Err(UpstreamError::new(UpstreamErrorKind::MissingApiKey).into());
        }

        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            UpstreamError::new(UpstreamErrorKind::Transport(format!(
                "Failed to build HTTP client: {}",
                e
            )))
        })?;

        debug!(model = %model, timeout_ms = timeout.as_millis() as u64, "Created Gemini client");

        Ok(Self {
            client,
            api_key,
            model,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout,
        })
    }

    /// Point the client at another API root (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns the API root in use.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    fn transport_error(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::new(UpstreamErrorKind::Timeout(self.timeout.as_millis() as u64))
        } else {
            UpstreamError::new(UpstreamErrorKind::Transport(err.to_string()))
        }
    }
}

#[async_trait]
impl GenerationDriver for GeminiClient {
    #[instrument(skip(self, req), fields(model))]
    async fn generate(&self, req: &GenerateRequest) -> CursoResult<GenerateResponse> {
        let model = req.model().as_deref().unwrap_or(self.model.as_str());
        tracing::Span::current().record("model", model);

        let body = conversions::to_gemini_request(req);
        debug!(
            model,
            grounding = !body.tools.is_empty(),
            structured = req.response_schema().is_some(),
            prompt_chars = req.prompt().len(),
            "Sending request"
        );

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(model, error = ?e, "HTTP request failed");
                self.transport_error(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(model, status = %status, error = %error_text, "API error");
            return Err(UpstreamError::new(UpstreamErrorKind::HttpStatus {
                status_code: status.as_u16(),
                message: error_text,
            })
            .into());
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            error!(model, error = ?e, "Failed to parse response envelope");
            if e.is_timeout() {
                self.transport_error(e)
            } else {
                UpstreamError::new(UpstreamErrorKind::Envelope(e.to_string()))
            }
        })?;

        debug!(
            model,
            candidates = gemini_response.candidates.len(),
            "Received response"
        );

        Ok(conversions::from_gemini_response(gemini_response))
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_api_key_is_rejected() {
        let result = GeminiClient::new("  ".into(), "gemini-2.5-flash".into(), Duration::from_secs(5));
        let err = result.unwrap_err();
        assert!(format!("{}", err).contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_endpoint_joins_model() {
        let client = GeminiClient::new("key".into(), "m".into(), Duration::from_secs(5))
            .unwrap()
            .with_base_url("http://localhost:9999/v1beta/");
        assert_eq!(
            client.endpoint("gemini-2.5-flash"),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
