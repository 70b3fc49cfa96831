//! Quality Gate stage

use crate::error::PipelineError;
use crate::generator::Generator;
use crate::parser::parse_quality;
use crate::prompt::Prompt;
use mindmap_domain::traits::LlmProvider;
use mindmap_domain::{QualityDecision, QualityScore};
use std::fmt::Display;
use tracing::info;

/// Grade a transcript on the 1-10 rubric
pub async fn grade<L>(generator: &Generator<L>, transcript: &str) -> Result<QualityScore, PipelineError>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
{
    let response = generator
        .generate("quality_check", Prompt::quality_check(transcript))
        .await?;
    let score = parse_quality(&response)?;
    info!(
        score = score.value(),
        decision = QualityDecision::from_score(score).as_str(),
        "quality graded"
    );
    Ok(score)
}
