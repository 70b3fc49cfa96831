//! State module - the single record that flows through the pipeline
//!
//! Each stage consumes a `PipelineState` and returns a new one with only the
//! fields it owns replaced. The raw source is fixed at construction.

use crate::analysis::TranscriptAnalysis;
use crate::participant::ParticipantSet;
use crate::quality::QualityScore;
use crate::source::Source;
use crate::topic::Topic;

/// Mutable-by-replacement record carried from Load to Done
#[derive(Debug, Clone)]
pub struct PipelineState {
    source: Source,
    transcript: Option<String>,
    quality_score: Option<QualityScore>,
    chunks: Vec<String>,
    participants: ParticipantSet,
    topics: Vec<Topic>,
    clean_iterations: u32,
}

impl PipelineState {
    /// Start a new run for the given source
    pub fn new(source: Source) -> Self {
        Self {
            source,
            transcript: None,
            quality_score: None,
            chunks: Vec::new(),
            participants: ParticipantSet::new(),
            topics: Vec::new(),
            clean_iterations: 0,
        }
    }

    /// The raw input this run was created for
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Current transcript text, if loaded
    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    /// Score from the most recent quality check on the current transcript
    pub fn quality_score(&self) -> Option<QualityScore> {
        self.quality_score
    }

    /// Chunks derived from the current transcript
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// Participants found so far
    pub fn participants(&self) -> &ParticipantSet {
        &self.participants
    }

    /// Topics found so far
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// How many Cleaner passes have run
    pub fn clean_iterations(&self) -> u32 {
        self.clean_iterations
    }

    /// Replace the transcript
    ///
    /// Chunks and the quality score were derived from the previous text, so
    /// both are discarded.
    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = Some(transcript.into());
        self.quality_score = None;
        self.chunks.clear();
        self
    }

    /// Record one Cleaner pass
    pub fn record_clean_iteration(mut self) -> Self {
        self.clean_iterations += 1;
        self
    }

    /// Replace the quality score
    pub fn with_quality_score(mut self, score: QualityScore) -> Self {
        self.quality_score = Some(score);
        self
    }

    /// Replace the chunk list
    pub fn with_chunks(mut self, chunks: Vec<String>) -> Self {
        self.chunks = chunks;
        self
    }

    /// Replace the participant set
    pub fn with_participants(mut self, participants: ParticipantSet) -> Self {
        self.participants = participants;
        self
    }

    /// Replace the topic list
    pub fn with_topics(mut self, topics: Vec<Topic>) -> Self {
        self.topics = topics;
        self
    }

    /// Convert into the downstream artifact
    pub fn to_analysis(&self) -> Result<TranscriptAnalysis, String> {
        let transcript = self
            .transcript
            .clone()
            .ok_or_else(|| "pipeline state has no transcript".to_string())?;
        Ok(TranscriptAnalysis {
            transcript,
            participants: self.participants.as_slice().to_vec(),
            topics: self.topics.clone(),
        })
    }

    /// Consume into the downstream artifact
    pub fn into_analysis(self) -> Result<TranscriptAnalysis, String> {
        let transcript = self
            .transcript
            .ok_or_else(|| "pipeline state has no transcript".to_string())?;
        Ok(TranscriptAnalysis {
            transcript,
            participants: self.participants.into_vec(),
            topics: self.topics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> PipelineState {
        PipelineState::new(Source::from_bytes(b"raw".to_vec(), Some("a.txt".to_string())))
    }

    #[test]
    fn test_new_state_is_empty() {
        let s = state();
        assert!(s.transcript().is_none());
        assert!(s.quality_score().is_none());
        assert!(s.chunks().is_empty());
        assert!(s.participants().is_empty());
        assert!(s.topics().is_empty());
        assert_eq!(s.clean_iterations(), 0);
    }

    #[test]
    fn test_new_transcript_drops_stale_chunks_and_score() {
        let s = state()
            .with_transcript("first")
            .with_quality_score(QualityScore::new(5).unwrap())
            .with_chunks(vec!["first".to_string()])
            .with_transcript("second");

        assert_eq!(s.transcript(), Some("second"));
        assert!(s.chunks().is_empty());
        assert!(s.quality_score().is_none());
    }

    #[test]
    fn test_chunks_are_replaced_not_appended() {
        let s = state()
            .with_chunks(vec!["a".to_string(), "b".to_string()])
            .with_chunks(vec!["c".to_string()]);
        assert_eq!(s.chunks(), ["c".to_string()]);
    }

    #[test]
    fn test_source_is_preserved() {
        let s = state().with_transcript("x").record_clean_iteration();
        assert_eq!(s.source().extension().as_deref(), Some("txt"));
        assert_eq!(s.clean_iterations(), 1);
    }

    #[test]
    fn test_into_analysis_requires_transcript() {
        assert!(state().into_analysis().is_err());

        let mut participants = ParticipantSet::new();
        participants.insert("Ana");
        let analysis = state()
            .with_transcript("Ana: hi")
            .with_participants(participants)
            .with_topics(vec![Topic::new("Hi")])
            .into_analysis()
            .unwrap();
        assert_eq!(analysis.participants, vec!["Ana"]);
        assert_eq!(analysis.topics.len(), 1);
    }
}
