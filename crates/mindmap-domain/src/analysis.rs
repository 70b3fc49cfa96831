//! Analysis module - the artifact handed to downstream persistence

use crate::topic::Topic;
use serde::{Deserialize, Serialize};

/// Final structured output of a pipeline run
///
/// Field names and shapes are the contract with the persistence layer;
/// renaming any of them breaks that boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptAnalysis {
    /// Cleaned transcript text
    pub transcript: String,

    /// Unique participant names, first-seen order
    pub participants: Vec<String>,

    /// Deduplicated topics, first-insertion order
    pub topics: Vec<Topic>,
}

impl TranscriptAnalysis {
    /// Total number of supporting quotes across all topics
    pub fn quote_count(&self) -> usize {
        self.topics.iter().map(|t| t.content.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topic::ContentItem;

    #[test]
    fn test_wire_shape() {
        let analysis = TranscriptAnalysis {
            transcript: "Ana: Hello.".to_string(),
            participants: vec!["Ana".to_string()],
            topics: vec![Topic::new("Greetings").with_content(ContentItem::new(Some("Ana"), "Hello."))],
        };

        let json = serde_json::to_value(&analysis).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        assert!(json.get("transcript").is_some());
        assert!(json.get("participants").is_some());
        assert!(json.get("topics").is_some());
        assert_eq!(analysis.quote_count(), 1);
    }
}
