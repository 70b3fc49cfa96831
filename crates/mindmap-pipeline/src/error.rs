//! Error types for the pipeline

use mindmap_domain::QualityScore;
use thiserror::Error;

/// Errors that abort a pipeline run
///
/// No variant carries partial results: a failed run yields nothing.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The source could not be turned into text
    #[error("Load error: {0}")]
    Load(String),

    /// The generation capability failed (network, rate limit, provider error)
    #[error("Generation error: {0}")]
    Generation(String),

    /// The generation capability answered, but not in the requested shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A generation call exceeded the configured per-call timeout
    #[error("Timeout during {stage} after {secs}s")]
    Timeout {
        /// Stage whose call timed out
        stage: &'static str,
        /// Configured timeout
        secs: u64,
    },

    /// The transcript never reached the quality threshold
    #[error("Quality loop exhausted after {iterations} clean iterations (last score {last_score})")]
    QualityLoopExhausted {
        /// Number of Cleaner passes that ran
        iterations: u32,
        /// Score of the final pass
        last_score: QualityScore,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A spawned task panicked or was cancelled
    #[error("Task error: {0}")]
    Task(String),

    /// The downstream sink rejected the artifact
    #[error("Sink error: {0}")]
    Sink(String),

    /// The state record was not in the shape a stage expected
    #[error("State error: {0}")]
    State(String),
}

impl PipelineError {
    /// Whether this error came from the generation capability
    ///
    /// Covers provider failures, malformed structured output and timeouts.
    pub fn is_generation_error(&self) -> bool {
        matches!(
            self,
            PipelineError::Generation(_)
                | PipelineError::InvalidResponse(_)
                | PipelineError::Timeout { .. }
        )
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        PipelineError::InvalidResponse(format!("JSON parse error: {}", e))
    }
}
