//! Pipeline orchestrator
//!
//! Drives a [`PipelineState`] through the [`Stage`] state machine. Each stage
//! consumes the state and returns it with only its own fields replaced.

use crate::chunking::TextSplitter;
use crate::cleaner::clean;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::generator::Generator;
use crate::participants::extract_participants;
use crate::quality_gate::grade;
use crate::topics::extract_topics;
use crate::types::{PipelineRun, RunMetadata};
use mindmap_domain::traits::{LlmProvider, TextExtractor, TranscriptSink};
use mindmap_domain::{PipelineState, Source, Stage};
use mindmap_loader::FileLoader;
use std::fmt::Display;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// The transcript analysis pipeline
pub struct Pipeline<L, X = FileLoader> {
    generator: Generator<L>,
    extractor: Arc<X>,
    splitter: TextSplitter,
    config: PipelineConfig,
    model_name: String,
}

impl<L> Pipeline<L, FileLoader>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
{
    /// Create a pipeline that loads sources with [`FileLoader`]
    pub fn new(llm: L, config: PipelineConfig) -> Result<Self, PipelineError> {
        Self::with_extractor(llm, FileLoader::new(), config)
    }
}

impl<L, X> Pipeline<L, X>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
    X: TextExtractor + Send + Sync + 'static,
    X::Error: Display,
{
    /// Create a pipeline with a custom text extractor
    pub fn with_extractor(llm: L, extractor: X, config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;
        Ok(Self {
            generator: Generator::new(llm, config.call_timeout()),
            extractor: Arc::new(extractor),
            splitter: TextSplitter::new(config.chunk_size, config.chunk_overlap),
            config,
            model_name: "llm".to_string(),
        })
    }

    /// Set the model name reported in run metadata
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one source through every stage
    pub async fn run(&self, source: Source) -> Result<PipelineRun, PipelineError> {
        let start_time = Instant::now();
        info!(source = %source.describe(), "Starting pipeline run");

        let mut state = PipelineState::new(source);
        let mut stage = Stage::Load;

        loop {
            debug!(stage = %stage, "entering stage");
            state = match stage {
                Stage::Load => {
                    let text = self.load(state.source().clone()).await?;
                    state.with_transcript(text)
                }
                Stage::Clean => {
                    let cleaned = clean(&self.generator, current_transcript(&state)?).await?;
                    state.with_transcript(cleaned).record_clean_iteration()
                }
                Stage::QualityCheck => {
                    let score = grade(&self.generator, current_transcript(&state)?).await?;
                    let state = state.with_quality_score(score);
                    if !score.passes() {
                        if state.clean_iterations() >= self.config.max_clean_iterations {
                            warn!(
                                iterations = state.clean_iterations(),
                                score = score.value(),
                                "transcript never reached the quality threshold"
                            );
                            return Err(PipelineError::QualityLoopExhausted {
                                iterations: state.clean_iterations(),
                                last_score: score,
                            });
                        }
                        info!(score = score.value(), "quality below threshold, re-cleaning");
                    }
                    state
                }
                Stage::Split => {
                    let chunks = self.splitter.split(current_transcript(&state)?);
                    info!(chunks = chunks.len(), "transcript split");
                    state.with_chunks(chunks)
                }
                Stage::Extract => {
                    let transcript = current_transcript(&state)?;
                    let chunks = state.chunks();
                    let (participants, topics) = tokio::try_join!(
                        extract_participants(&self.generator, chunks, self.config.max_concurrent_calls),
                        extract_topics(
                            &self.generator,
                            self.config.topic_mode,
                            transcript,
                            chunks,
                            self.config.max_concurrent_calls,
                        ),
                    )?;
                    state.with_participants(participants).with_topics(topics)
                }
                Stage::Done => break,
            };
            stage = stage.next(state.quality_score()).map_err(PipelineError::State)?;
        }

        let metadata = RunMetadata {
            model_name: self.model_name.clone(),
            clean_iterations: state.clean_iterations(),
            chunk_count: state.chunks().len(),
            topic_mode: self.config.topic_mode,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
        };

        info!(
            "Pipeline complete: {} participants, {} topics, {} clean passes, {} ms",
            state.participants().len(),
            state.topics().len(),
            metadata.clean_iterations,
            metadata.processing_time_ms
        );

        Ok(PipelineRun { state, metadata })
    }

    /// Run and hand the resulting artifact to `sink`
    pub async fn run_and_persist<S>(&self, source: Source, sink: &mut S) -> Result<PipelineRun, PipelineError>
    where
        S: TranscriptSink,
        S::Error: Display,
    {
        let run = self.run(source).await?;
        let analysis = run.analysis()?;
        sink.persist(&analysis)
            .map_err(|e| PipelineError::Sink(e.to_string()))?;
        Ok(run)
    }

    /// Load stage: extraction may touch the filesystem, so it runs off the runtime
    async fn load(&self, source: Source) -> Result<String, PipelineError> {
        let extractor = Arc::clone(&self.extractor);
        tokio::task::spawn_blocking(move || {
            extractor
                .extract(&source)
                .map_err(|e| PipelineError::Load(e.to_string()))
        })
        .await
        .map_err(|e| PipelineError::Task(format!("Task join error: {}", e)))?
    }
}

fn current_transcript(state: &PipelineState) -> Result<&str, PipelineError> {
    state
        .transcript()
        .ok_or_else(|| PipelineError::State("transcript missing after load".to_string()))
}
