//! MindMap Pipeline
//!
//! Turns a raw meeting transcript into participants and a deduplicated set
//! of topics, each with attributed quotes and links to related topics.
//!
//! # Architecture
//!
//! ```text
//! Load → Clean → QualityCheck ─(< 7)→ Clean
//!                     │
//!                   (≥ 7)
//!                     ↓
//!                   Split → Participants ∥ Topics → Done
//! ```
//!
//! # Key Features
//!
//! - **Quality-gated cleaning**: re-clean until the transcript scores 7 or
//!   better, bounded by `max_clean_iterations`
//! - **Recursive splitting**: 1500-character chunks with 200 characters of
//!   overlap, cut at the coarsest available boundary
//! - **Concurrent fan-out**: per-chunk calls run in parallel, results are
//!   folded in chunk order so output is deterministic
//! - **Ordered-set-union merge**: topics with the same title across chunks
//!   are combined without duplicating quotes or connections
//!
//! # Example Usage
//!
//! ```no_run
//! use mindmap_domain::Source;
//! use mindmap_llm::MockProvider;
//! use mindmap_pipeline::{Pipeline, PipelineConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::default();
//! let pipeline = Pipeline::new(llm, PipelineConfig::default())?;
//!
//! let run = pipeline.run(Source::from_path("standup.txt")).await?;
//! let analysis = run.into_analysis()?;
//!
//! println!("Participants: {:?}", analysis.participants);
//! println!("Topics: {}", analysis.topics.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod chunking;
mod cleaner;
mod config;
mod error;
mod fanout;
mod generator;
mod parser;
mod participants;
mod pipeline;
mod prompt;
mod quality_gate;
mod sink;
mod topics;
mod types;


pub use chunking::{TextSplitter, DEFAULT_SEPARATORS};
pub use config::{PipelineConfig, TopicMode};
pub use error::PipelineError;
pub use parser::{parse_participants, parse_quality, parse_topics};
pub use pipeline::Pipeline;
pub use prompt::Prompt;
pub use sink::{JsonFileSink, MemorySink};
pub use types::{PipelineRun, RunMetadata};
