//! Construct the configured language model backend.

use crate::config::{ProviderConfig, ProviderKind};
use crate::error::{CliError, Result};
use mindmap_domain::traits::LlmProvider;
use mindmap_llm::{LlmError, MockProvider, OllamaProvider, OpenAiProvider};
use mindmap_pipeline::Prompt;
use tracing::{debug, warn};

/// One of the supported backends behind a single `LlmProvider`.
pub enum Provider {
    /// Local Ollama server
    Ollama(OllamaProvider),
    /// OpenAI-compatible API
    OpenAi(OpenAiProvider),
    /// Offline scripted provider
    Mock(MockProvider),
}

impl Provider {
    /// Build the backend described by `config`.
    ///
    /// The OpenAI key is read from the environment variable named by
    /// `api_key_env`; a missing key is a configuration error.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        debug!(kind = ?config.kind, model = %config.model, "building provider");
        let provider = match config.kind {
            ProviderKind::Ollama => {
                let endpoint = config
                    .endpoint
                    .as_deref()
                    .unwrap_or(mindmap_llm::ollama::DEFAULT_ENDPOINT);
                let mut provider = OllamaProvider::new(endpoint, &config.model);
                if let Some(temperature) = config.temperature {
                    provider = provider.with_temperature(temperature);
                }
                Provider::Ollama(provider)
            }
            ProviderKind::OpenAi => {
                let api_key = std::env::var(&config.api_key_env).map_err(|_| {
                    CliError::Config(format!(
                        "Environment variable {} is not set",
                        config.api_key_env
                    ))
                })?;
                let mut provider = OpenAiProvider::new(api_key, &config.model);
                if let Some(endpoint) = &config.endpoint {
                    provider = provider.with_base_url(endpoint);
                }
                if let Some(temperature) = config.temperature {
                    provider = provider.with_temperature(temperature);
                }
                Provider::OpenAi(provider)
            }
            ProviderKind::Mock => {
                warn!("using the offline mock provider; output is canned");
                Provider::Mock(offline_mock())
            }
        };
        Ok(provider)
    }

    /// Model name reported in run metadata.
    pub fn model_name(&self) -> String {
        match self {
            Provider::Ollama(p) => p.model().to_string(),
            Provider::OpenAi(p) => p.model().to_string(),
            Provider::Mock(_) => "mock".to_string(),
        }
    }
}

/// Canned answers that carry a run from Load to Done without a network.
fn offline_mock() -> MockProvider {
    let mut mock = MockProvider::new("The meeting transcript.");
    mock.add_response(Prompt::quality_check("").system, r#"{"quality_check": 10}"#);
    mock.add_response(Prompt::participants("").system, r#"{"participants": []}"#);
    mock.add_response(Prompt::topics("").system, r#"{"topics": []}"#);
    mock
}

impl LlmProvider for Provider {
    type Error = LlmError;

    fn generate(&self, system: &str, user: &str) -> std::result::Result<String, Self::Error> {
        match self {
            Provider::Ollama(p) => p.generate(system, user),
            Provider::OpenAi(p) => p.generate(system, user),
            Provider::Mock(p) => p.generate(system, user),
        }
    }

    fn generate_structured(
        &self,
        system: &str,
        user: &str,
        schema: &str,
    ) -> std::result::Result<String, Self::Error> {
        match self {
            Provider::Ollama(p) => p.generate_structured(system, user, schema),
            Provider::OpenAi(p) => p.generate_structured(system, user, schema),
            Provider::Mock(p) => p.generate_structured(system, user, schema),
        }
    }
}
