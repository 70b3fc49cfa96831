//! Quality module - the readability grade that gates re-cleaning

use std::fmt;

/// Scores below this value send the transcript back to the Cleaner.
///
/// Fixed by design of the pipeline; not configurable.
pub const QUALITY_THRESHOLD: u8 = 7;

/// Lowest valid score
pub const MIN_SCORE: u8 = 1;

/// Highest valid score
pub const MAX_SCORE: u8 = 10;

/// A whole-number transcript quality grade in [1, 10]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualityScore(u8);

impl QualityScore {
    /// Create a score, rejecting values outside [1, 10]
    ///
    /// # Examples
    ///
    /// ```
    /// use mindmap_domain::QualityScore;
    ///
    /// assert_eq!(QualityScore::new(8).unwrap().value(), 8);
    /// assert!(QualityScore::new(0).is_err());
    /// assert!(QualityScore::new(11).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, String> {
        if value < MIN_SCORE as i64 || value > MAX_SCORE as i64 {
            return Err(format!(
                "quality score {} out of range [{}, {}]",
                value, MIN_SCORE, MAX_SCORE
            ));
        }
        Ok(Self(value as u8))
    }

    /// Create a score, clipping out-of-range values into [1, 10]
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as u8)
    }

    /// Raw score value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Whether this score clears the quality threshold
    pub fn passes(&self) -> bool {
        self.0 >= QUALITY_THRESHOLD
    }
}

impl fmt::Display for QualityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, MAX_SCORE)
    }
}

/// Outcome of the Quality Gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityDecision {
    /// Score below threshold: run the Cleaner again
    Reclean,
    /// Score at or above threshold: proceed to splitting
    Pass,
}

impl QualityDecision {
    /// Decide what follows a quality check
    pub fn from_score(score: QualityScore) -> Self {
        if score.passes() {
            QualityDecision::Pass
        } else {
            QualityDecision::Reclean
        }
    }

    /// Decision name as used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityDecision::Reclean => "reclean",
            QualityDecision::Pass => "pass",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_at_boundaries() {
        for (value, expected) in [
            (1, QualityDecision::Reclean),
            (6, QualityDecision::Reclean),
            (7, QualityDecision::Pass),
            (10, QualityDecision::Pass),
        ] {
            let score = QualityScore::new(value).unwrap();
            assert_eq!(QualityDecision::from_score(score), expected, "score {}", value);
        }
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(QualityScore::new(0).is_err());
        assert!(QualityScore::new(-3).is_err());
        assert!(QualityScore::new(11).is_err());
        assert!(QualityScore::new(1).is_ok());
        assert!(QualityScore::new(10).is_ok());
    }

    #[test]
    fn test_clamped() {
        assert_eq!(QualityScore::clamped(0).value(), 1);
        assert_eq!(QualityScore::clamped(42).value(), 10);
        assert_eq!(QualityScore::clamped(5).value(), 5);
    }

    #[test]
    fn test_display() {
        assert_eq!(QualityScore::new(8).unwrap().to_string(), "8/10");
    }
}
