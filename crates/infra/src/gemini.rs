//! Gemini `generateContent` adapter for the completion capability.
//!
//! One `complete` call is one HTTP request. The model is asked for
//! `application/json` output constrained by a response schema; the first text
//! part of the first candidate is parsed as JSON (markdown fences tolerated).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use mandi_ai::{CompletionClient, CompletionError, CompletionRequest};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone, PartialEq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub temperature: f32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: crate::config::DEFAULT_GEMINI_MODEL.to_string(),
            base_url: crate::config::DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(20),
            temperature: 0.2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: JsonValue,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

fn build_body(request: &CompletionRequest, temperature: f32) -> GenerateRequest {
    GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: request.system.clone(),
            }],
        },
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: request.prompt.clone(),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: to_gemini_schema(&request.target_schema),
            temperature,
        },
    }
}

/// Gemini's schema dialect spells types in upper case (`OBJECT`, `STRING`, ...).
fn to_gemini_schema(schema: &JsonValue) -> JsonValue {
    match schema {
        JsonValue::Object(map) => JsonValue::Object(
            map.iter()
                .map(|(k, v)| {
                    let v = match (k.as_str(), v) {
                        ("type", JsonValue::String(t)) => JsonValue::String(t.to_ascii_uppercase()),
                        _ => to_gemini_schema(v),
                    };
                    (k.clone(), v)
                })
                .collect(),
        ),
        JsonValue::Array(items) => JsonValue::Array(items.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}

fn strip_markdown_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn extract_candidate_json(raw: &str) -> Result<JsonValue, CompletionError> {
    let response: GenerateResponse =
        serde_json::from_str(raw).map_err(|e| CompletionError::Malformed(format!("response envelope: {e}")))?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or_else(|| CompletionError::Malformed("no candidate text".to_string()))?;

    serde_json::from_str(strip_markdown_fences(&text))
        .map_err(|e| CompletionError::Malformed(format!("candidate is not JSON: {e}")))
}

fn map_transport(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Transport(err.to_string())
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<JsonValue, CompletionError> {
        let body = build_body(request, self.config.temperature);

        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status();
        let text = response.text().await.map_err(map_transport)?;
        debug!(status = status.as_u16(), bytes = text.len(), model = %self.config.model, "gemini response");

        if !status.is_success() {
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: text.chars().take(500).collect(),
            });
        }

        extract_candidate_json(&text)
    }

    fn is_available(&self) -> bool {
        !self.config.api_key.trim().is_empty()
    }
}
