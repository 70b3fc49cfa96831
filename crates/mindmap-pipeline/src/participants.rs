//! Participant Extractor stage

use crate::error::PipelineError;
use crate::fanout::fan_out;
use crate::generator::Generator;
use crate::parser::parse_participants;
use crate::prompt::Prompt;
use mindmap_domain::traits::LlmProvider;
use mindmap_domain::ParticipantSet;
use std::fmt::Display;
use tracing::info;

/// Identify speakers in every chunk and union them
///
/// Identity is exact string equality. First-seen order follows chunk index,
/// not completion order.
pub async fn extract_participants<L>(
    generator: &Generator<L>,
    chunks: &[String],
    max_concurrent: usize,
) -> Result<ParticipantSet, PipelineError>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
{
    let per_chunk = fan_out(chunks, max_concurrent, |_, chunk| {
        let generator = generator.clone();
        async move {
            let response = generator
                .generate("participants", Prompt::participants(&chunk))
                .await?;
            parse_participants(&response)
        }
    })
    .await?;

    let participants: ParticipantSet = per_chunk.into_iter().flatten().collect();
    info!(count = participants.len(), chunks = chunks.len(), "participants identified");
    Ok(participants)
}
