//! Google Gemini provider implementation
//!
//! This module implements the GenerativeProvider trait against the Gemini
//! generateContent REST API.
//! See: https://ai.google.dev/api/generate-content

use crate::error::{GatewayError, Result};
use crate::provider::GenerativeProvider;
use crate::request::{GenerateOptions, PromptSpec};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model: fast enough for interactive data retrieval
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(120);

/// Gemini provider
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the default model
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Create a provider for a specific model with the default timeout
    pub fn with_model(api_key: String, model: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, model, DEFAULT_TIMEOUT)
    }

    /// Create a provider with an explicit per-request timeout
    pub fn with_timeout(
        api_key: String,
        model: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            model: model.into(),
        })
    }

    /// Create a provider from environment variable
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable,
    /// the single credential this system requires.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            GatewayError::Configuration("GEMINI_API_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key)
    }

    /// Currently configured model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(spec: &PromptSpec, options: &GenerateOptions) -> GeminiRequest {
        let mut parts = vec![Part::Text {
            text: spec.text.clone(),
        }];
        for attachment in &spec.attachments {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: attachment.mime_type.clone(),
                    data: attachment.data.clone(),
                },
            });
        }

        let tools = options.web_grounding.then(|| {
            vec![Tool {
                google_search: GoogleSearch {},
            }]
        });

        let generation_config = (options.strict_json || options.thinking_budget.is_some()).then(
            || GenerationConfig {
                response_mime_type: options
                    .strict_json
                    .then(|| "application/json".to_string()),
                thinking_config: options
                    .thinking_budget
                    .map(|thinking_budget| ThinkingConfig { thinking_budget }),
            },
        );

        GeminiRequest {
            contents: vec![Content { parts }],
            tools,
            generation_config,
        }
    }
}

#[async_trait]
impl GenerativeProvider for GeminiProvider {
    #[instrument(skip(self, spec, options), fields(model = %self.model))]
    async fn generate(&self, spec: &PromptSpec, options: &GenerateOptions) -> Result<String> {
        options.validate()?;

        let request = Self::build_request(spec, options);
        debug!(
            attachments = spec.attachments.len(),
            grounded = options.web_grounding,
            strict_json = options.strict_json,
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(format!(
                "{GEMINI_API_BASE}/models/{}:generateContent",
                self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 | 403 => GatewayError::AuthenticationFailed,
                429 => GatewayError::RateLimited(error_text),
                503 => GatewayError::ServiceUnavailable(error_text),
                400 => GatewayError::InvalidRequest(error_text),
                404 => GatewayError::ModelNotFound(self.model.clone()),
                _ => GatewayError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            GatewayError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        let text = gemini_response
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| match part {
                        Part::Text { text } => Some(text),
                        Part::InlineData { .. } => None,
                    })
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GatewayError::EmptyResponse);
        }

        debug!(chars = text.len(), "Received response from Gemini");
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

// Gemini-specific request/response types
// These match the generateContent wire format exactly

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
