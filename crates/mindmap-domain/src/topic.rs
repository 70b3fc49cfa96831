//! Topic module - extracted topics and the ordered-set-union merge
//!
//! Topic extraction runs once per chunk, so the same topic usually comes back
//! several times with overlapping quotes. [`TopicAccumulator`] folds those
//! results together:
//!
//! - topics are keyed by exact title and kept in first-insertion order
//! - quotes are appended only when their `speaker:text` key is unseen
//! - connected-topic titles are appended only when the title is unseen
//!
//! Merging is idempotent and membership does not depend on chunk order, but
//! element order is first-seen-wins, so callers must fold chunks in index order.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A quoted, attributed piece of transcript supporting a topic
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentItem {
    /// Who said it, if the transcript attributes it
    pub speaker: Option<String>,

    /// The quoted text
    pub text: String,
}

impl ContentItem {
    /// Create a content item
    pub fn new(speaker: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.map(str::to_string),
            text: text.into(),
        }
    }

    /// Composite dedup key: `speaker:text`, absent speaker rendered as empty
    ///
    /// An absent speaker and an empty speaker name therefore share a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use mindmap_domain::ContentItem;
    ///
    /// assert_eq!(ContentItem::new(Some("Ana"), "hi").dedup_key(), "Ana:hi");
    /// assert_eq!(ContentItem::new(None, "hi").dedup_key(), ":hi");
    /// ```
    pub fn dedup_key(&self) -> String {
        format!("{}:{}", self.speaker.as_deref().unwrap_or(""), self.text)
    }
}

/// A titled cluster of quotes with links to related topics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique title; exact string equality is identity
    pub title: String,

    /// Supporting quotes, unique by [`ContentItem::dedup_key`]
    #[serde(default)]
    pub content: Vec<ContentItem>,

    /// Titles of related topics, unique by exact string
    #[serde(default)]
    pub connected_topics: Vec<String>,
}

impl Topic {
    /// Create a topic with no content or connections
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Vec::new(),
            connected_topics: Vec::new(),
        }
    }

    /// Builder: add a quote
    pub fn with_content(mut self, item: ContentItem) -> Self {
        self.content.push(item);
        self
    }

    /// Builder: add a connected topic title
    pub fn with_connection(mut self, title: impl Into<String>) -> Self {
        self.connected_topics.push(title.into());
        self
    }

    /// Whether every quote key and connected title appears at most once
    pub fn is_deduplicated(&self) -> bool {
        let mut keys = HashSet::new();
        let mut titles = HashSet::new();
        self.content.iter().all(|c| keys.insert(c.dedup_key()))
            && self.connected_topics.iter().all(|t| titles.insert(t.as_str()))
    }
}

/// A topic plus the key sets that make appends O(1)
#[derive(Debug, Clone)]
struct TrackedTopic {
    topic: Topic,
    content_keys: HashSet<String>,
    connected: HashSet<String>,
}

impl TrackedTopic {
    fn new(title: String) -> Self {
        Self {
            topic: Topic::new(title),
            content_keys: HashSet::new(),
            connected: HashSet::new(),
        }
    }

    /// Ordered-set union of `other` into this topic
    fn absorb(&mut self, other: Topic) -> usize {
        let mut added = 0;
        for item in other.content {
            if self.content_keys.insert(item.dedup_key()) {
                self.topic.content.push(item);
                added += 1;
            }
        }
        for title in other.connected_topics {
            if self.connected.insert(title.clone()) {
                self.topic.connected_topics.push(title);
                added += 1;
            }
        }
        added
    }
}

/// Accumulates topic candidates from many chunks into one deduplicated list
///
/// # Examples
///
/// ```
/// use mindmap_domain::{ContentItem, Topic, TopicAccumulator};
///
/// let c1 = ContentItem::new(Some("X"), "hi");
/// let c2 = ContentItem::new(Some("Y"), "hello");
///
/// let mut acc = TopicAccumulator::new();
/// acc.merge_chunk(vec![Topic::new("A").with_content(c1.clone())]);
/// acc.merge_chunk(vec![Topic::new("A").with_content(c1.clone()).with_content(c2.clone())]);
///
/// let topics = acc.into_topics();
/// assert_eq!(topics.len(), 1);
/// assert_eq!(topics[0].content, vec![c1, c2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TopicAccumulator {
    entries: Vec<TrackedTopic>,
    index: HashMap<String, usize>,
}

impl TopicAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge every candidate from one chunk, in the order given
    ///
    /// Returns the number of new quotes and connections added.
    pub fn merge_chunk(&mut self, candidates: Vec<Topic>) -> usize {
        candidates
            .into_iter()
            .map(|topic| self.merge_topic(topic))
            .sum()
    }

    /// Merge a single candidate
    ///
    /// An unseen title becomes a new entry; a known title gets the candidate's
    /// quotes and connections appended where their keys are new. New entries
    /// are deduplicated too, so a candidate that repeats itself stays clean.
    pub fn merge_topic(&mut self, candidate: Topic) -> usize {
        let position = match self.index.get(&candidate.title) {
            Some(&position) => position,
            None => {
                let position = self.entries.len();
                self.index.insert(candidate.title.clone(), position);
                self.entries.push(TrackedTopic::new(candidate.title.clone()));
                position
            }
        };
        self.entries[position].absorb(candidate)
    }

    /// Number of distinct topics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no topics have been merged
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a topic by exact title
    pub fn get(&self, title: &str) -> Option<&Topic> {
        self.index.get(title).map(|&i| &self.entries[i].topic)
    }

    /// Final topics in first-insertion order
    pub fn into_topics(self) -> Vec<Topic> {
        self.entries.into_iter().map(|entry| entry.topic).collect()
    }
}
