//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local chat API so transcripts never
//! leave the machine.
//!
//! # Features
//!
//! - Async HTTP communication with Ollama's `/api/chat`
//! - System and user messages sent as separate chat turns
//! - Structured output via Ollama's `format` field (JSON Schema)
//! - Optional transport retry with exponential backoff
//!
//! # Examples
//!
//! ```no_run
//! use mindmap_llm::OllamaProvider;
//!
//! // Create an Ollama provider
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3.1");
//!
//! // The async methods are used directly from async code; the `LlmProvider`
//! // trait methods block and are meant for `spawn_blocking`.
//! ```

use crate::{block_on, LlmError};
use mindmap_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for LLM requests (120 seconds; full transcripts are slow)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of attempts (a single attempt: failures surface to the pipeline)
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Ollama API provider for local LLM inference
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

/// Request body for Ollama chat API
#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<ChatOptions>,
}

#[derive(Deserialize)]
struct OllamaChatMessage {
    content: String,
}

/// Response from Ollama chat API
#[derive(Deserialize)]
struct OllamaChatResponse {
    message: OllamaChatMessage,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3.1", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: DEFAULT_MAX_RETRIES,
            temperature: None,
        }
    }

    /// Create a new Ollama provider on `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the per-request HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout);
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Model name this provider talks to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one chat request
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Ollama is not running
    /// - Model is not available
    /// - Network communication fails
    /// - Response format is invalid
    pub async fn chat(
        &self,
        system: &str,
        user: &str,
        format: Option<serde_json::Value>,
    ) -> Result<String, LlmError> {
        let url = format!("{}/api/chat", self.endpoint);

        let request_body = OllamaChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            stream: false,
            format,
            options: self.temperature.map(|temperature| ChatOptions { temperature }),
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(&request_body).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response.json::<OllamaChatResponse>().await.map_err(|e| {
                            LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                        })?;
                        debug!(model = %self.model, chars = body.message.content.len(), "ollama reply");
                        return Ok(body.message.content);
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.model.clone()));
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(LlmError::RateLimitExceeded);
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!("Ollama request failed, retrying in {:?}", delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }

    /// Generate structured output conforming to a JSON Schema
    pub async fn chat_structured(
        &self,
        system: &str,
        user: &str,
        schema: &str,
    ) -> Result<String, LlmError> {
        let format: serde_json::Value = serde_json::from_str(schema)
            .map_err(|e| LlmError::Configuration(format!("Invalid JSON schema: {}", e)))?;
        self.chat(system, user, Some(format)).await
    }
}

fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

impl LlmProviderTrait for OllamaProvider {
    type Error = LlmError;

    fn generate(&self, system: &str, user: &str) -> Result<String, Self::Error> {
        block_on(self.chat(system, user, None))?
    }

    fn generate_structured(
        &self,
        system: &str,
        user: &str,
        schema: &str,
    ) -> Result<String, Self::Error> {
        block_on(self.chat_structured(system, user, schema))?
    }
}
