//! Gemini `generateContent` client.
//!
//! Uses `ureq` for HTTP. ureq is synchronous, so each call runs on the
//! blocking pool via `spawn_blocking`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{GenerateRequest, LlmClient, LlmError};
use crate::config::IntelConfig;

// ── Request / Response types ─────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "GenerationConfig::is_empty")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

impl GenerationConfig {
    fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.response_mime_type.is_none()
            && self.response_schema.is_none()
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate; empty when there is
    /// none.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

// ── Client ───────────────────────────────────────────────────────────────────

/// Gemini REST client. Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    config: IntelConfig,
    agent: ureq::Agent,
}

impl GeminiClient {
    pub fn new(config: IntelConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout())
            .build()
            .into();
        GeminiClient { config, agent }
    }

    pub fn config(&self) -> &IntelConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }
}

fn build_body(request: &GenerateRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![RequestPart {
                text: request.prompt.clone(),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: request.temperature,
            response_mime_type: request.response_mime_type.clone(),
            response_schema: request.response_schema.clone(),
        },
    }
}

/// Make a single blocking call (no retry).
fn call_generate_content(
    agent: &ureq::Agent,
    url: &str,
    api_key: &str,
    body: &GenerateContentRequest,
) -> Result<String, LlmError> {
    let response = agent
        .post(url)
        .header("x-goog-api-key", api_key)
        .header("content-type", "application/json")
        .send_json(body)
        .map_err(|e| LlmError::Network(e.to_string()))?;

    let status = response.status().as_u16();
    if !(200..300).contains(&status) {
        let message = response
            .into_body()
            .read_to_string()
            .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
        return Err(LlmError::Api {
            status,
            message: truncate(message.trim(), 300),
        });
    }

    let parsed: GenerateContentResponse = response
        .into_body()
        .read_json()
        .map_err(|e| LlmError::Parse(format!("failed to decode generateContent response: {}", e)))?;
    Ok(parsed.text())
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError> {
        let agent = self.agent.clone();
        let url = self.endpoint(&request.model);
        let api_key = self.config.api_key.clone();
        let body = build_body(request);

        tracing::debug!(model = %request.model, prompt_len = request.prompt.len(), "calling generateContent");

        tokio::task::spawn_blocking(move || call_generate_content(&agent, &url, &api_key, &body))
            .await
            .map_err(|e| LlmError::Join(e.to_string()))?
    }
}
