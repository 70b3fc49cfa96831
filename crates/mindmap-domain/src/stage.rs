//! Stage module - the pipeline's finite-state machine
//!
//! ```text
//! Load → Clean → QualityCheck ─(score < 7)→ Clean
//!                     │
//!                 (score ≥ 7)
//!                     ↓
//!                   Split → Extract (participants ∧ topics) → Done
//! ```

use crate::quality::{QualityDecision, QualityScore};

/// A pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Convert the raw source into plain text
    Load,
    /// Rewrite the transcript into readable prose
    Clean,
    /// Grade the cleaned transcript
    QualityCheck,
    /// Partition the transcript into overlapping chunks
    Split,
    /// Participant and topic extraction over the chunk set
    Extract,
    /// Terminal state
    Done,
}

impl Stage {
    /// Stage name as used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Clean => "clean",
            Stage::QualityCheck => "quality_check",
            Stage::Split => "split",
            Stage::Extract => "extract",
            Stage::Done => "done",
        }
    }

    /// Pure transition function
    ///
    /// `score` is only consulted when leaving [`Stage::QualityCheck`], where it
    /// is required.
    ///
    /// # Examples
    ///
    /// ```
    /// use mindmap_domain::{QualityScore, Stage};
    ///
    /// let low = QualityScore::new(6).unwrap();
    /// let high = QualityScore::new(7).unwrap();
    /// assert_eq!(Stage::QualityCheck.next(Some(low)).unwrap(), Stage::Clean);
    /// assert_eq!(Stage::QualityCheck.next(Some(high)).unwrap(), Stage::Split);
    /// ```
    pub fn next(self, score: Option<QualityScore>) -> Result<Stage, String> {
        match self {
            Stage::Load => Ok(Stage::Clean),
            Stage::Clean => Ok(Stage::QualityCheck),
            Stage::QualityCheck => {
                let score = score
                    .ok_or_else(|| "quality check finished without a score".to_string())?;
                Ok(match QualityDecision::from_score(score) {
                    QualityDecision::Reclean => Stage::Clean,
                    QualityDecision::Pass => Stage::Split,
                })
            }
            Stage::Split => Ok(Stage::Extract),
            Stage::Extract => Ok(Stage::Done),
            Stage::Done => Err("pipeline already finished".to_string()),
        }
    }

    /// Whether this is the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Done)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
