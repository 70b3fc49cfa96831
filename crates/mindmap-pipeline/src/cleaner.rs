//! Cleaner stage

use crate::error::PipelineError;
use crate::generator::Generator;
use crate::prompt::Prompt;
use mindmap_domain::traits::LlmProvider;
use std::fmt::Display;
use tracing::info;

/// Rewrite a transcript into clean prose
///
/// The answer is accepted verbatim; no length or content check is made.
pub async fn clean<L>(generator: &Generator<L>, transcript: &str) -> Result<String, PipelineError>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
{
    let cleaned = generator.generate("clean", Prompt::clean(transcript)).await?;
    info!(
        before = transcript.chars().count(),
        after = cleaned.chars().count(),
        "transcript cleaned"
    );
    Ok(cleaned)
}
