//! MindMap LLM Provider Layer
//!
//! Pluggable implementations of the generation capability used by every
//! pipeline stage that talks to a language model.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from `mindmap-domain`.
//! It supports multiple LLM backends with a common interface.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic, scriptable fake for testing
//! - `OllamaProvider`: Local Ollama chat API
//! - `OpenAiProvider`: OpenAI-compatible chat completions API
//!
//! # Examples
//!
//! ```
//! use mindmap_llm::MockProvider;
//! use mindmap_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("system", "user").unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod ollama;
pub mod openai;

use mindmap_domain::traits::LlmProvider as LlmProviderTrait;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Response text that makes [`MockProvider`] fail instead of answering
pub const MOCK_ERROR: &str = "ERROR";

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider misconfigured (missing key, bad runtime)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Drive an async request to completion from synchronous trait methods
///
/// Must be called from a blocking context (e.g. inside `spawn_blocking`) when a
/// tokio runtime is already running.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, LlmError> {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => Ok(handle.block_on(future)),
        Err(_) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| LlmError::Configuration(format!("Failed to start runtime: {}", e)))?;
            Ok(runtime.block_on(future))
        }
    }
}

/// A scripted answer for calls whose prompts match
#[derive(Debug, Clone)]
struct Rule {
    system_contains: Option<String>,
    user_contains: Option<String>,
    responses: VecDeque<String>,
    delay: Option<Duration>,
}

impl Rule {
    fn matches(&self, system: &str, user: &str) -> bool {
        self.system_contains.as_deref().map_or(true, |s| system.contains(s))
            && self.user_contains.as_deref().map_or(true, |u| user.contains(u))
    }

    /// Pop the next queued response; the last one repeats forever
    fn next_response(&mut self) -> String {
        if self.responses.len() > 1 {
            self.responses.pop_front().unwrap_or_default()
        } else {
            self.responses.front().cloned().unwrap_or_default()
        }
    }
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
/// Rules are checked in the order they were added; the first rule whose
/// system and user fragments both match answers the call. A rule may hold
/// several responses, which are handed out in order with the last one
/// repeating.
///
/// # Examples
///
/// ```
/// use mindmap_llm::MockProvider;
/// use mindmap_domain::traits::LlmProvider;
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate("sys", "any prompt").unwrap(), "Fixed response");
///
/// // Scripted sequence for one kind of call
/// let mut provider = MockProvider::default();
/// provider.add_sequence("grade", ["5", "8"]);
/// assert_eq!(provider.generate("grade this", "t").unwrap(), "5");
/// assert_eq!(provider.generate("grade this", "t").unwrap(), "8");
/// assert_eq!(provider.generate("grade this", "t").unwrap(), "8");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    rules: Arc<Mutex<Vec<Rule>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            rules: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn rules(&self) -> MutexGuard<'_, Vec<Rule>> {
        self.rules.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn calls(&self) -> MutexGuard<'_, Vec<(String, String)>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push_rule(
        &mut self,
        system_contains: Option<String>,
        user_contains: Option<String>,
        responses: VecDeque<String>,
        delay: Option<Duration>,
    ) {
        self.rules().push(Rule {
            system_contains,
            user_contains,
            responses,
            delay,
        });
    }

    /// Answer calls whose system instruction contains `system_fragment`
    pub fn add_response(&mut self, system_fragment: impl Into<String>, response: impl Into<String>) {
        self.push_rule(
            Some(system_fragment.into()),
            None,
            VecDeque::from([response.into()]),
            None,
        );
    }

    /// Answer successive calls matching `system_fragment` with `responses` in order
    pub fn add_sequence<I, S>(&mut self, system_fragment: impl Into<String>, responses: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let responses = responses.into_iter().map(Into::into).collect();
        self.push_rule(Some(system_fragment.into()), None, responses, None);
    }

    /// Answer calls matching both the system and user fragments
    pub fn add_chunk_response(
        &mut self,
        system_fragment: impl Into<String>,
        user_fragment: impl Into<String>,
        response: impl Into<String>,
    ) {
        self.push_rule(
            Some(system_fragment.into()),
            Some(user_fragment.into()),
            VecDeque::from([response.into()]),
            None,
        );
    }

    /// Like [`add_chunk_response`](Self::add_chunk_response), but sleep first
    ///
    /// Used to make concurrent calls complete out of order.
    pub fn add_delayed_response(
        &mut self,
        system_fragment: impl Into<String>,
        user_fragment: impl Into<String>,
        response: impl Into<String>,
        delay: Duration,
    ) {
        self.push_rule(
            Some(system_fragment.into()),
            Some(user_fragment.into()),
            VecDeque::from([response.into()]),
            Some(delay),
        );
    }

    /// Configure to return an error for calls matching `system_fragment`
    pub fn add_error(&mut self, system_fragment: impl Into<String>) {
        self.add_response(system_fragment, MOCK_ERROR);
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    /// Number of calls whose system instruction contained `system_fragment`
    pub fn calls_matching(&self, system_fragment: &str) -> usize {
        self.calls()
            .iter()
            .filter(|(system, _)| system.contains(system_fragment))
            .count()
    }

    /// All `(system, user)` pairs received so far, in call order
    pub fn recorded_calls(&self) -> Vec<(String, String)> {
        self.calls().clone()
    }

    /// Reset the call log
    pub fn reset_call_count(&self) {
        self.calls().clear();
    }

    fn respond(&self, system: &str, user: &str) -> Result<String, LlmError> {
        self.calls().push((system.to_string(), user.to_string()));

        let (response, delay) = {
            let mut rules = self.rules();
            match rules.iter_mut().find(|rule| rule.matches(system, user)) {
                Some(rule) => (rule.next_response(), rule.delay),
                None => (self.default_response.clone(), None),
            }
        };

        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }

        if response == MOCK_ERROR {
            return Err(LlmError::Other("Mock error".to_string()));
        }
        Ok(response)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, system: &str, user: &str) -> Result<String, Self::Error> {
        self.respond(system, user)
    }

    fn generate_structured(
        &self,
        system: &str,
        user: &str,
        _schema: &str,
    ) -> Result<String, Self::Error> {
        // The schema is not enforced; scripted responses are returned verbatim
        self.respond(system, user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("sys", "any prompt");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("clean", "cleaned");
        provider.add_response("grade", "{\"quality_check\": 9}");

        assert_eq!(provider.generate("please clean", "x").unwrap(), "cleaned");
        assert_eq!(
            provider.generate_structured("grade it", "x", "{}").unwrap(),
            "{\"quality_check\": 9}"
        );
        assert_eq!(provider.generate("unknown", "x").unwrap(), "Default mock response");
    }

    #[test]
    fn test_mock_provider_sequence_repeats_last() {
        let mut provider = MockProvider::default();
        provider.add_sequence("q", ["1", "2"]);

        assert_eq!(provider.generate("q", "").unwrap(), "1");
        assert_eq!(provider.generate("q", "").unwrap(), "2");
        assert_eq!(provider.generate("q", "").unwrap(), "2");
    }

    #[test]
    fn test_mock_provider_first_matching_rule_wins() {
        let mut provider = MockProvider::default();
        provider.add_chunk_response("topics", "chunk-2", "second");
        provider.add_response("topics", "fallback");

        assert_eq!(provider.generate("topics", "text chunk-2 here").unwrap(), "second");
        assert_eq!(provider.generate("topics", "text chunk-1 here").unwrap(), "fallback");
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.generate("a", "prompt1").unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate("b", "prompt2").unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.calls_matching("a"), 1);
        assert_eq!(provider.recorded_calls()[1], ("b".to_string(), "prompt2".to_string()));

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad");

        let result = provider.generate("bad system", "x");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), LlmError::Other(_)));
    }

    #[test]
    fn test_mock_provider_clone() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("s", "test").unwrap();

        // Both should share the same call log due to Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }

    #[test]
    fn test_block_on_without_runtime() {
        let value = block_on(async { 41 + 1 }).unwrap();
        assert_eq!(value, 42);
    }
}
