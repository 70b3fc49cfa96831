//! Topic Extractor stage
//!
//! In chunked mode every chunk is sent separately and the answers are folded
//! through a [`TopicAccumulator`] strictly in chunk-index order. In
//! whole-document mode a single answer goes through the same accumulator so
//! the deduplication guarantees hold either way.

use crate::config::TopicMode;
use crate::error::PipelineError;
use crate::fanout::fan_out;
use crate::generator::Generator;
use crate::parser::parse_topics;
use crate::prompt::Prompt;
use mindmap_domain::traits::LlmProvider;
use mindmap_domain::{Topic, TopicAccumulator};
use std::fmt::Display;
use tracing::{debug, info};

/// Extract and merge topics
pub async fn extract_topics<L>(
    generator: &Generator<L>,
    mode: TopicMode,
    transcript: &str,
    chunks: &[String],
    max_concurrent: usize,
) -> Result<Vec<Topic>, PipelineError>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
{
    let per_call = match mode {
        TopicMode::Chunked => {
            fan_out(chunks, max_concurrent, |_, chunk| {
                let generator = generator.clone();
                async move {
                    let response = generator.generate("topics", Prompt::topics(&chunk)).await?;
                    parse_topics(&response)
                }
            })
            .await?
        }
        TopicMode::WholeDocument => {
            let response = generator.generate("topics", Prompt::topics(transcript)).await?;
            vec![parse_topics(&response)?]
        }
    };

    let mut accumulator = TopicAccumulator::new();
    for (index, candidates) in per_call.into_iter().enumerate() {
        let added = accumulator.merge_chunk(candidates);
        debug!(chunk = index, added, topics = accumulator.len(), "merged topic candidates");
    }

    let topics = accumulator.into_topics();
    info!(count = topics.len(), mode = mode.as_str(), "topics identified");
    Ok(topics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindmap_domain::ContentItem;
    use mindmap_llm::MockProvider;
    use std::time::Duration;

    const SYSTEM: &str = "Identify the topics";

    fn chunks() -> Vec<String> {
        vec!["chunk-0 text".to_string(), "chunk-1 text".to_string()]
    }

    #[tokio::test]
    async fn test_chunk_results_merged_in_index_order() {
        let mut llm = MockProvider::default();
        // chunk-0 answers last
        llm.add_delayed_response(
            SYSTEM,
            "chunk-0",
            r#"{"topics": [{"title": "A", "content": [{"speaker": "X", "text": "c1"}], "connected_topics": ["B"]}]}"#,
            Duration::from_millis(200),
        );
        llm.add_chunk_response(
            SYSTEM,
            "chunk-1",
            r#"{"topics": [
                {"title": "B", "content": [], "connected_topics": []},
                {"title": "A", "content": [{"speaker": "X", "text": "c1"}, {"speaker": "Y", "text": "c2"}], "connected_topics": ["B"]}
            ]}"#,
        );
        let generator = Generator::new(llm, Duration::from_secs(5));

        let topics = extract_topics(&generator, TopicMode::Chunked, "", &chunks(), 2)
            .await
            .unwrap();

        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].title, "A");
        assert_eq!(topics[1].title, "B");
        assert_eq!(
            topics[0].content,
            vec![
                ContentItem::new(Some("X"), "c1"),
                ContentItem::new(Some("Y"), "c2")
            ]
        );
        assert_eq!(topics[0].connected_topics, vec!["B"]);
    }

    #[tokio::test]
    async fn test_whole_document_mode_makes_one_call() {
        let mut llm = MockProvider::default();
        llm.add_response(
            SYSTEM,
            r#"{"topics": [{"title": "A", "content": [{"speaker": null, "text": "t"}, {"speaker": null, "text": "t"}], "connected_topics": []}]}"#,
        );
        let generator = Generator::new(llm.clone(), Duration::from_secs(5));

        let topics = extract_topics(&generator, TopicMode::WholeDocument, "full text", &chunks(), 2)
            .await
            .unwrap();

        assert_eq!(llm.calls_matching(SYSTEM), 1);
        assert!(llm.recorded_calls()[0].1.contains("full text"));
        assert_eq!(topics[0].content.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_chunk_fails_branch() {
        let mut llm = MockProvider::default();
        llm.add_chunk_response(SYSTEM, "chunk-0", r#"{"topics": []}"#);
        llm.add_chunk_response(SYSTEM, "chunk-1", "not json at all");
        let generator = Generator::new(llm, Duration::from_secs(5));

        let result = extract_topics(&generator, TopicMode::Chunked, "", &chunks(), 2).await;
        assert!(matches!(result, Err(PipelineError::InvalidResponse(_))));
    }
}
