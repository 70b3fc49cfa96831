//! MindMap Domain Layer
//!
//! This crate contains the core domain model for the transcript analysis pipeline.
//! It has no runtime dependencies beyond serde derives and defines the fundamental
//! concepts, value objects, and trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **PipelineState**: The single record that flows through every stage
//! - **Quality Score**: Integer grade in [1, 10] that gates re-cleaning
//! - **Topic**: A titled cluster of attributed quotes with links to related topics
//! - **Ordered-set union**: The merge rule used to fold per-chunk topic results
//! - **Stage**: The finite-state machine that sequences the pipeline
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure domain logic only (no I/O, no async)
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external capabilities

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod participant;
pub mod quality;
pub mod source;
pub mod stage;
pub mod state;
pub mod topic;
pub mod traits;

// Re-exports for convenience
pub use analysis::TranscriptAnalysis;
pub use participant::ParticipantSet;
pub use quality::{QualityDecision, QualityScore, QUALITY_THRESHOLD};
pub use source::Source;
pub use stage::Stage;
pub use state::PipelineState;
pub use topic::{ContentItem, Topic, TopicAccumulator};
