//! Raw HTTP client for the Gemini `generateContent` API.
//!
//! One POST per call, no retries, no client-side timeout. Knows nothing
//! about the presentation layer.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::types::{GenerateContentRequest, GenerateContentResponse};
use super::ContentSource;
use crate::lyrics::build_prompt;

/// Errors from a generation request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("topic is empty")]
    EmptyTopic,

    #[error("API key is empty")]
    EmptyCredential,

    #[error("API request failed: {0}")]
    HttpStatus(u16),

    #[error("unexpected API response shape: {0}")]
    MalformedEnvelope(EnvelopeFault),

    #[error("network error: {0}")]
    NetworkFailure(String),

    #[error("a generation request is already in progress")]
    Busy,
}

/// What was wrong with a 2xx response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeFault {
    /// Valid JSON, but no first candidate with content. The API answered
    /// without a result (blocked prompt, bad key scope, ...).
    #[error("no candidate content")]
    NoCandidate,

    /// Body is not a JSON envelope at all.
    #[error("body is not JSON")]
    Undecodable,

    /// Candidate content present, but its first part carries no text.
    #[error("no text part")]
    NoText,
}

impl RequestError {
    /// True when the failure came back from the API itself (as opposed to
    /// input validation, the transport, or an unreadable body). These point
    /// at the key.
    pub fn concerns_api(&self) -> bool {
        matches!(
            self,
            Self::HttpStatus(_) | Self::MalformedEnvelope(EnvelopeFault::NoCandidate)
        )
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        Self::NetworkFailure(e.to_string())
    }
}

/// Raw HTTP client for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client with the default base URL and model.
    pub fn new() -> Self {
        Self::with_base_url(
            musicbank_config::DEFAULT_BASE_URL.into(),
            musicbank_config::DEFAULT_MODEL.into(),
        )
    }

    /// Create a client with a custom base URL (for testing with mock servers).
    pub fn with_base_url(base_url: String, model: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    /// Build from loaded configuration.
    pub fn from_config(config: &musicbank_config::Config) -> Self {
        Self::with_base_url(config.base_url.clone(), config.model.clone())
    }

    /// Endpoint URL with the credential in the `key` query parameter.
    fn endpoint(&self, credential: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            urlencoding::encode(credential)
        )
    }

    /// Send one `generateContent` request for a prompt and return the
    /// first candidate's text.
    pub async fn generate(&self, prompt: String, credential: &str) -> Result<String, RequestError> {
        let request = GenerateContentRequest::from_prompt(prompt);

        debug!(model = %self.model, "sending generateContent request");
        let response = self
            .http
            .post(self.endpoint(credential))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // reqwest includes the URL (and so the key) in its message
                let e = e.without_url();
                warn!("generateContent transport failure: {e}");
                RequestError::from(e)
            })?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            warn!(status, "generateContent returned an error status");
            return Err(RequestError::HttpStatus(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RequestError::from(e.without_url()))?;
        extract_text(&body)
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentSource for GeminiClient {
    async fn generate_content(&self, topic: &str, credential: &str) -> Result<String, RequestError> {
        self.generate(build_prompt(topic), credential).await
    }
}

/// Pull the text payload out of a success envelope.
pub fn extract_text(body: &str) -> Result<String, RequestError> {
    let envelope: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        warn!("undecodable generateContent body: {e}");
        RequestError::MalformedEnvelope(EnvelopeFault::Undecodable)
    })?;
    let content = envelope
        .first_content()
        .ok_or(RequestError::MalformedEnvelope(EnvelopeFault::NoCandidate))?;
    content
        .first_text()
        .map(str::to_string)
        .ok_or(RequestError::MalformedEnvelope(EnvelopeFault::NoText))
}
