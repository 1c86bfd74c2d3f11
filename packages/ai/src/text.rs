use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::error::{classify_status, GenerationError, GenerationResult};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Structured text generation seam. The report pipeline only ever talks to
/// this trait, so tests swap in scripted doubles.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run a prompt that requests JSON output and return the parsed value
    async fn generate_structured(&self, prompt: &str, system: &str) -> GenerationResult<Value>;
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatRequestMessage>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatRequestMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Chat-completions client used for report generation
pub struct OpenAiTextClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl OpenAiTextClient {
    fn create_client() -> Client {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client")
    }

    /// API key comes from OPENAI_API_KEY; the model can be overridden with
    /// STAYSCOPE_TEXT_MODEL.
    pub fn new() -> Self {
        let api_key = env::var("OPENAI_API_KEY").ok();
        if api_key.is_none() {
            info!("OPENAI_API_KEY not set - text generation will fail until a key is provided");
        }

        let model = env::var("STAYSCOPE_TEXT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        if model != DEFAULT_MODEL {
            info!("Using custom text model: {}", model);
        }

        Self {
            client: Self::create_client(),
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_api_key(api_key: String) -> Self {
        let model = env::var("STAYSCOPE_TEXT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self {
            client: Self::create_client(),
            api_key: Some(api_key),
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_api_key_and_model(api_key: String, model: String) -> Self {
        Self {
            client: Self::create_client(),
            api_key: Some(api_key),
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API host, e.g. a proxy or a test
    /// server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Default for OpenAiTextClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for OpenAiTextClient {
    async fn generate_structured(&self, prompt: &str, system: &str) -> GenerationResult<Value> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| GenerationError::Auth("no API key configured".to_string()))?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatRequestMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatRequestMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        info!(
            "Requesting structured generation: model={}, max_tokens={}",
            request.model, request.max_tokens
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("structured generation timed out after {REQUEST_TIMEOUT_SECS}s");
                    GenerationError::Network("request timed out".to_string())
                } else if e.is_connect() {
                    error!("failed to connect to generation API: {}", e);
                    GenerationError::Network(format!("connection failed: {e}"))
                } else {
                    error!("structured generation request failed: {}", e);
                    GenerationError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("generation API error: {} - {}", status, detail);
            return Err(classify_status(status.as_u16(), detail));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        let content = chat
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .ok_or_else(|| {
                GenerationError::MalformedResponse("response carried no content".to_string())
            })?;

        let json_text = strip_code_fences(content);
        serde_json::from_str(json_text).map_err(|e| {
            error!("generated content is not valid JSON: {}", e);
            GenerationError::MalformedResponse(format!("content is not valid JSON: {e}"))
        })
    }
}

/// Strip markdown code fences some models wrap JSON output in
/// (```json ... ```)
pub(crate) fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let start = trimmed.find('\n').map(|i| i + 1).unwrap_or(0);
    let end = trimmed[start..]
        .rfind("```")
        .map(|i| start + i)
        .unwrap_or(trimmed.len());
    trimmed[start..end].trim()
}
