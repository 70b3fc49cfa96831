//! Bridge from the blocking `LlmProvider` trait into async stages

use crate::error::PipelineError;
use crate::prompt::Prompt;
use mindmap_domain::traits::LlmProvider;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Shared handle to the generation capability
///
/// Each call runs on the blocking pool and is bounded by a per-call timeout.
/// A call that times out is not interrupted; it finishes on the blocking pool
/// and its answer is dropped. Cloning is cheap, so fan-out tasks each take their own handle.
pub struct Generator<L> {
    llm: Arc<L>,
    call_timeout: Duration,
}

impl<L> Clone for Generator<L> {
    fn clone(&self) -> Self {
        Self {
            llm: Arc::clone(&self.llm),
            call_timeout: self.call_timeout,
        }
    }
}

impl<L> Generator<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
{
    /// Wrap a provider
    pub fn new(llm: L, call_timeout: Duration) -> Self {
        Self {
            llm: Arc::new(llm),
            call_timeout,
        }
    }

    /// Send a prompt and return the raw answer
    ///
    /// `stage` labels timeout errors.
    pub async fn generate(&self, stage: &'static str, prompt: Prompt) -> Result<String, PipelineError> {
        let llm = Arc::clone(&self.llm);
        debug!(stage, user_chars = prompt.user.len(), structured = prompt.schema.is_some(), "LLM call");

        // Call in a blocking context since LlmProvider is not async
        let call = tokio::task::spawn_blocking(move || {
            let result = match prompt.schema {
                Some(schema) => llm.generate_structured(prompt.system, &prompt.user, schema),
                None => llm.generate(prompt.system, &prompt.user),
            };
            result.map_err(|e| PipelineError::Generation(e.to_string()))
        });

        let response = timeout(self.call_timeout, call)
            .await
            .map_err(|_| PipelineError::Timeout {
                stage,
                secs: self.call_timeout.as_secs(),
            })?
            .map_err(|e| PipelineError::Task(format!("Task join error: {}", e)))??;

        debug!(stage, response_chars = response.len(), "LLM response");
        Ok(response)
    }
}
