//! Result types for a pipeline run

use crate::config::TopicMode;
use crate::error::PipelineError;
use mindmap_domain::{PipelineState, TranscriptAnalysis};
use serde::{Deserialize, Serialize};

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// Terminal state record
    pub state: PipelineState,

    /// Metadata about the run
    pub metadata: RunMetadata,
}

impl PipelineRun {
    /// The artifact handed to downstream persistence
    pub fn analysis(&self) -> Result<TranscriptAnalysis, PipelineError> {
        self.state.to_analysis().map_err(PipelineError::State)
    }

    /// Consume the run, keeping only the artifact
    pub fn into_analysis(self) -> Result<TranscriptAnalysis, PipelineError> {
        self.state.into_analysis().map_err(PipelineError::State)
    }
}

/// Metadata about a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Name of the LLM model used
    pub model_name: String,

    /// Number of Cleaner passes
    pub clean_iterations: u32,

    /// Number of chunks produced by the Splitter
    pub chunk_count: usize,

    /// Topic extraction mode
    pub topic_mode: TopicMode,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: u64,

    /// Unix timestamp (seconds) when the run finished
    pub timestamp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_serializes_mode_in_snake_case() {
        let metadata = RunMetadata {
            model_name: "mock".to_string(),
            clean_iterations: 2,
            chunk_count: 3,
            topic_mode: TopicMode::WholeDocument,
            processing_time_ms: 10,
            timestamp: 0,
        };
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["topic_mode"], "whole_document");
        assert_eq!(json["clean_iterations"], 2);
    }
}
