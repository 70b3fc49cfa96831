//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and the
//! capabilities it consumes. Infrastructure implementations live in other crates.

use crate::analysis::TranscriptAnalysis;
use crate::source::Source;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (mindmap-llm). Calls are blocking;
/// async callers dispatch them onto a blocking thread.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate free text from a system instruction and a user payload
    fn generate(&self, system: &str, user: &str) -> Result<String, Self::Error>;

    /// Generate a JSON document conforming to `schema` (a JSON Schema string)
    fn generate_structured(
        &self,
        system: &str,
        user: &str,
        schema: &str,
    ) -> Result<String, Self::Error>;
}

/// Trait for turning a raw source into plain text
///
/// Implemented by the infrastructure layer (mindmap-loader)
pub trait TextExtractor {
    /// Error type for extraction operations
    type Error;

    /// Extract the plain text content of a source
    fn extract(&self, source: &Source) -> Result<String, Self::Error>;
}

/// Trait for the downstream collaborator that receives finished analyses
pub trait TranscriptSink {
    /// Error type for persistence operations
    type Error;

    /// Persist one finished analysis
    fn persist(&mut self, analysis: &TranscriptAnalysis) -> Result<(), Self::Error>;
}
