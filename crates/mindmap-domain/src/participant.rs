//! Participant module - the set of people who spoke

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

/// Exact-match set of participant names that remembers first-seen order
///
/// Identity is case-sensitive string equality: "Alice" and "alice" are two
/// participants. No normalisation or alias matching is applied.
///
/// # Examples
///
/// ```
/// use mindmap_domain::ParticipantSet;
///
/// let mut set = ParticipantSet::new();
/// set.extend(["Alice".to_string()]);
/// set.extend(["alice".to_string(), "Alice".to_string()]);
/// assert_eq!(set.as_slice(), ["Alice", "alice"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantSet {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl ParticipantSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name; returns false if it was already present
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.seen.contains(&name) {
            return false;
        }
        self.seen.insert(name.clone());
        self.ordered.push(name);
        true
    }

    /// Whether the exact name is present
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// Number of participants
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Names in first-seen order
    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }

    /// Iterate names in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.ordered.iter()
    }

    /// Consume into names in first-seen order
    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

impl Extend<String> for ParticipantSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl FromIterator<String> for ParticipantSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Serialize for ParticipantSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.ordered.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ParticipantSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        Ok(names.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_sensitive_union() {
        let mut set = ParticipantSet::new();
        set.extend(vec!["Alice".to_string()]);
        set.extend(vec!["alice".to_string()]);

        assert_eq!(set.len(), 2);
        assert!(set.contains("Alice"));
        assert!(set.contains("alice"));
    }

    #[test]
    fn test_insert_reports_duplicates() {
        let mut set = ParticipantSet::new();
        assert!(set.insert("Bob"));
        assert!(!set.insert("Bob"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_first_seen_order() {
        let set: ParticipantSet = ["Cy", "Al", "Cy", "Bo"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(set.into_vec(), vec!["Cy", "Al", "Bo"]);
    }

    #[test]
    fn test_serializes_as_array() {
        let set: ParticipantSet = ["A", "B"].into_iter().map(String::from).collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["A","B"]"#);

        let back: ParticipantSet = serde_json::from_str(r#"["A","A","B"]"#).unwrap();
        assert_eq!(back.len(), 2);
    }
}
