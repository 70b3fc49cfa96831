//! OpenAI-compatible chat completions provider
//!
//! Works against any server that speaks `/v1/chat/completions`, including
//! hosted OpenAI and local proxies. Structured calls use
//! `response_format: { type: "json_schema" }`.

use crate::{block_on, LlmError};
use mindmap_domain::traits::LlmProvider as LlmProviderTrait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default base URL (without the `/chat/completions` suffix)
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// OpenAI-compatible chat completions provider
pub struct OpenAiProvider {
    base_url: String,
    model: String,
    api_key: String,
    temperature: Option<f32>,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat {
    name: &'static str,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseFormat {
    JsonSchema { json_schema: JsonSchemaFormat },
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a provider for `model` authenticated with `api_key`
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            temperature: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Point the provider at another OpenAI-compatible server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the per-request HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Model name this provider talks to
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_headers(&self) -> Result<HeaderMap, LlmError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !self.api_key.is_empty() {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|e| {
                    LlmError::Configuration(format!("Invalid authorization header value: {}", e))
                })?,
            );
        }
        Ok(headers)
    }

    fn create_client(&self) -> Result<reqwest::Client, LlmError> {
        reqwest::Client::builder()
            .default_headers(self.build_headers()?)
            .timeout(self.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to build HTTP client: {}", e)))
    }

    /// Send one chat completion request
    pub async fn send_chat_completion(
        &self,
        system: &str,
        user: &str,
        schema: Option<serde_json::Value>,
    ) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(%url, model = %self.model, "sending chat completion request");

        let client = self.create_client()?;
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature: self.temperature,
            response_format: schema.map(|schema| ResponseFormat::JsonSchema {
                json_schema: JsonSchemaFormat {
                    name: "response",
                    strict: true,
                    schema,
                },
            }),
        };

        let response = client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(LlmError::Communication(format!(
                "API request failed with status {}: {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse API response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response has no content".to_string()))
    }
}

impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    fn generate(&self, system: &str, user: &str) -> Result<String, Self::Error> {
        block_on(self.send_chat_completion(system, user, None))?
    }

    fn generate_structured(
        &self,
        system: &str,
        user: &str,
        schema: &str,
    ) -> Result<String, Self::Error> {
        let schema: serde_json::Value = serde_json::from_str(schema)
            .map_err(|e| LlmError::Configuration(format!("Invalid JSON schema: {}", e)))?;
        block_on(self.send_chat_completion(system, user, Some(schema)))?
    }
}
