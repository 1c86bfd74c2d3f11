use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{classify_status, GenerationError, GenerationResult};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "dall-e-3";
const IMAGE_SIZE: &str = "1792x1024";
const IMAGE_QUALITY: &str = "standard";
const IMAGE_STYLE: &str = "natural";
// generation API rejects prompts beyond this length
const MAX_PROMPT_CHARS: usize = 4000;
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Scenario image generation seam
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Render one image for the prompt and return its URL
    async fn generate(&self, prompt: &str) -> GenerationResult<String>;
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    model: String,
    prompt: String,
    n: u32,
    size: String,
    quality: String,
    style: String,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    url: Option<String>,
}

/// Images-endpoint client used for scenario mood boards
pub struct OpenAiImageClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl OpenAiImageClient {
    fn create_client() -> Client {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client")
    }

    /// API key comes from OPENAI_API_KEY; the model can be overridden with
    /// STAYSCOPE_IMAGE_MODEL.
    pub fn new() -> Self {
        let api_key = env::var("OPENAI_API_KEY").ok();
        if api_key.is_none() {
            info!("OPENAI_API_KEY not set - image generation will fail until a key is provided");
        }

        let model = env::var("STAYSCOPE_IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        if model != DEFAULT_MODEL {
            info!("Using custom image model: {}", model);
        }

        Self {
            client: Self::create_client(),
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_api_key(api_key: String) -> Self {
        let model = env::var("STAYSCOPE_IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
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

impl Default for OpenAiImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    async fn generate(&self, prompt: &str) -> GenerationResult<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| GenerationError::Auth("no API key configured".to_string()))?;

        let request = ImageRequest {
            model: self.model.clone(),
            prompt: prompt.chars().take(MAX_PROMPT_CHARS).collect(),
            n: 1,
            size: IMAGE_SIZE.to_string(),
            quality: IMAGE_QUALITY.to_string(),
            style: IMAGE_STYLE.to_string(),
        };

        info!("Requesting image generation: model={}", request.model);

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("image generation timed out after {REQUEST_TIMEOUT_SECS}s");
                    GenerationError::Network("request timed out".to_string())
                } else if e.is_connect() {
                    error!("failed to connect to image API: {}", e);
                    GenerationError::Network(format!("connection failed: {e}"))
                } else {
                    error!("image generation request failed: {}", e);
                    GenerationError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("image API error: {} - {}", status, detail);
            return Err(classify_status(status.as_u16(), detail));
        }

        let images: ImageResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        images
            .data
            .into_iter()
            .next()
            .and_then(|datum| datum.url)
            .ok_or_else(|| {
                GenerationError::MalformedResponse("response carried no image URL".to_string())
            })
    }
}
