//! OpenAI-compatible keyword extractor implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use openpools_core::{defaults, Error, KeywordExtractor, KeywordInput, Result, Source};

use super::error::{to_openpools_error, OpenAIErrorCode};
use super::types::*;
use crate::parse::parse_keyword_response;
use crate::prompt::{system_prompt, user_prompt};

/// Configuration for the OpenAI-compatible extractor.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for authentication (optional for local endpoints).
    pub api_key: Option<String>,
    /// Chat model used for extraction.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Longer documents are truncated to this many characters.
    pub max_input_chars: usize,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::LLM_BASE_URL.to_string(),
            api_key: None,
            model: defaults::LLM_MODEL.to_string(),
            timeout_seconds: defaults::LLM_TIMEOUT_SECS,
            max_input_chars: defaults::LLM_MAX_INPUT_CHARS,
        }
    }
}

impl OpenAIConfig {
    /// Read `OPENPOOLS_LLM_*` environment variables over the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("OPENPOOLS_LLM_BASE_URL").unwrap_or(defaults.base_url),
            api_key: std::env::var("OPENPOOLS_LLM_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model: std::env::var("OPENPOOLS_LLM_MODEL").unwrap_or(defaults.model),
            timeout_seconds: std::env::var("OPENPOOLS_LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_seconds),
            max_input_chars: defaults.max_input_chars,
        }
    }
}

/// Keyword extractor backed by an OpenAI-compatible chat-completions API.
pub struct OpenAIKeywordExtractor {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIKeywordExtractor {
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "openai",
            base_url = %config.base_url,
            model = %config.model,
            "Initializing keyword extractor"
        );

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(OpenAIConfig::from_env())
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    /// Build a request with authentication if configured.
    fn build_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        let mut req = self.client.post(&url);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        req.header("Content-Type", "application/json")
    }

    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String> {
        let response = self
            .build_request("/chat/completions")
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Request(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body: OpenAIErrorResponse = response.json().await.unwrap_or(OpenAIErrorResponse {
                error: OpenAIError {
                    message: "Unknown error".to_string(),
                    error_type: "unknown".to_string(),
                    code: None,
                },
            });
            let code = OpenAIErrorCode::from_response(status.as_u16(), &body.error.error_type);
            warn!(
                subsystem = "inference",
                component = "openai",
                status = status.as_u16(),
                retryable = code.is_retryable(),
                error = %body.error.message,
                "Chat completion failed"
            );
            return Err(to_openpools_error(code, &body.error.message));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Extraction(format!("Failed to parse response: {}", e)))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Extraction("Model returned no choices".to_string()))
    }
}

#[async_trait]
impl KeywordExtractor for OpenAIKeywordExtractor {
    #[instrument(skip(self, text), fields(subsystem = "inference", component = "openai", op = "extract", model = %self.config.model, text_len = text.len()))]
    async fn extract(&self, text: &str, source: &Source) -> Result<Vec<KeywordInput>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let start = Instant::now();

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt()),
                ChatMessage::user(user_prompt(text, source, self.config.max_input_chars)),
            ],
            temperature: Some(0.0),
            max_tokens: None,
            response_format: Some(ResponseFormat::json_object()),
        };

        let content = self.complete(&request).await?;
        let keywords = parse_keyword_response(&content)?;

        debug!(
            keyword_count = keywords.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Keyword extraction complete"
        );
        Ok(keywords)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
