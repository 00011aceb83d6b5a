//! Gemini backend over the Generative Language REST API.
//!
//! Sends `POST {base_url}/v1beta/models/{model}:generateContent` with the
//! API key in the `x-goog-api-key` header. Only the non-streaming endpoint
//! is used.

use std::time::Duration;

use async_trait::async_trait;
use boardroom_core::config::GenerationConfig;
use serde::Deserialize;
use serde_json::json;

use crate::backend::TextBackend;
use crate::error::GenerationError;
use crate::request::GenerationRequest;

/// Connection settings for [`GeminiBackend`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Base URL without the version segment.
    pub base_url: String,
    /// Transport timeout. `None` waits until the call settles.
    pub request_timeout: Option<Duration>,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com".into(),
            request_timeout: None,
        }
    }

    /// Build from the `[generation]` config section, reading the key from
    /// the environment.
    pub fn from_generation_config(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            GenerationError::Config(format!(
                "environment variable {} is not set",
                config.api_key_env
            ))
        })?;
        let mut gemini = Self::new(api_key).with_base_url(config.base_url.clone());
        if let Some(secs) = config.request_timeout_secs {
            gemini = gemini.with_timeout(Duration::from_secs(secs));
        }
        Ok(gemini)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

/// Text backend for Google's Gemini models.
pub struct GeminiBackend {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("base_url", &self.config.base_url)
            .field("request_timeout", &self.config.request_timeout)
            .finish()
    }
}

impl GeminiBackend {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GenerationError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Map a non-success HTTP status to the matching error.
    fn map_http_error(status: reqwest::StatusCode, body: &str) -> GenerationError {
        let message = extract_error_message(body);
        match status.as_u16() {
            401 | 403 => GenerationError::Auth(format!("Gemini rejected the API key: {message}")),
            code => GenerationError::Provider {
                status: code,
                message,
            },
        }
    }
}

/// Build the JSON body for `generateContent`.
pub fn build_request_body(request: &GenerationRequest) -> serde_json::Value {
    let contents: Vec<serde_json::Value> = request
        .contents()
        .map(|(role, text)| {
            json!({
                "role": role.as_str(),
                "parts": [{ "text": text }],
            })
        })
        .collect();

    json!({
        "systemInstruction": { "parts": [{ "text": request.system_instruction }] },
        "contents": contents,
        "generationConfig": { "temperature": request.sampling.temperature },
    })
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Extract the reply text of the first candidate.
///
/// Returns `None` when the body has no candidate, no text parts, only
/// whitespace, or is not a valid response document.
pub fn parse_reply_text(body: &str) -> Option<String> {
    let response: GenerateContentResponse = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "Undecodable Gemini response treated as empty");
            return None;
        }
    };

    let text: String = response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Pull `error.message` out of an error body, or return the body itself.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl TextBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Option<String>, GenerationError> {
        let url = self.endpoint(&request.sampling.model);
        let body = build_request_body(request);

        tracing::debug!(
            model = %request.sampling.model,
            history = request.history.len(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;
        if !status.is_success() {
            return Err(Self::map_http_error(status, &body_text));
        }

        Ok(parse_reply_text(&body_text))
    }
}
