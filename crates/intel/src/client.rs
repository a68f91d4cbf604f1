//! The seam between the gateway and a text-generation provider.

use async_trait::async_trait;
use serde::Serialize;

/// Errors a provider call can produce. The gateway never surfaces these to
/// callers; they only end up in the log next to the fallback.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Transport failure: DNS, connect, TLS, timeout.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a non-success status.
    #[error("provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The response (or the text inside it) could not be decoded.
    #[error("unparseable response: {0}")]
    Parse(String),

    /// The blocking worker running the request did not finish.
    #[error("request task failed: {0}")]
    Join(String),
}

/// A single generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: Option<f32>,
    /// e.g. `application/json` for structured output.
    pub response_mime_type: Option<String>,
    /// Provider-format schema constraining structured output.
    pub response_schema: Option<serde_json::Value>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        GenerateRequest {
            model: model.into(),
            prompt: prompt.into(),
            temperature: None,
            response_mime_type: None,
            response_schema: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Ask for JSON output matching `schema`.
    pub fn with_json_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_mime_type = Some("application/json".to_string());
        self.response_schema = Some(schema);
        self
    }
}

/// Trait for calling a generative model and getting its text back.
///
/// `Ok("")` means the provider answered but produced no text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError>;
}
