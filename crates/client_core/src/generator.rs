//! Client for the generative image service.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::DataUri,
    protocol::{GenerateContentRequest, GenerateContentResponse, ServiceErrorBody},
};
use tracing::debug;
use url::Url;

use crate::error::GenerationError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Turns a free-text prompt into at most one image.
///
/// `Ok(None)` means the service answered but produced no image payload.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    fn has_credential(&self) -> bool;
    async fn generate_image(&self, prompt: &str) -> Result<Option<DataUri>, GenerationError>;
}

#[derive(Debug, Clone)]
pub struct ImageServiceConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Url,
}

impl ImageServiceConfig {
    pub fn new(api_key: Option<String>, model: impl Into<String>, base_url: Url) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: model.into(),
            base_url,
        }
    }
}

pub struct GeminiImageClient {
    http: Client,
    api_key: Option<String>,
    model: String,
    endpoint: Url,
}

impl GeminiImageClient {
    pub fn new(config: ImageServiceConfig) -> Result<Self, GenerationError> {
        let endpoint = generate_content_endpoint(&config.base_url, &config.model)?;
        Ok(Self {
            http: Client::new(),
            api_key: config.api_key.filter(|key| !key.trim().is_empty()),
            model: config.model,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ImageGenerator for GeminiImageClient {
    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate_image(&self, prompt: &str) -> Result<Option<DataUri>, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        debug!(model = %self.model, prompt_len = prompt.len(), "requesting image");
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, api_key)
            .json(&GenerateContentRequest::single_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(rejection(status, &body));
        }

        let parsed = serde_json::from_slice::<GenerateContentResponse>(&body)
            .map_err(|err| GenerationError::MalformedResponse(err.to_string()))?;
        let image = parsed.first_inline_image();
        debug!(
            candidates = parsed.candidates.len(),
            has_image = image.is_some(),
            "image response received"
        );
        Ok(image)
    }
}

fn generate_content_endpoint(base_url: &Url, model: &str) -> Result<Url, GenerationError> {
    let base = base_url.as_str().trim_end_matches('/');
    Ok(Url::parse(&format!(
        "{base}/v1beta/models/{model}:generateContent"
    ))?)
}

fn rejection(status: StatusCode, body: &[u8]) -> GenerationError {
    let message = serde_json::from_slice::<ServiceErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .ok()
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });
    GenerationError::Rejected {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
#[path = "tests/generator_tests.rs"]
mod tests;
