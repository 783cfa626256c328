//! @dose
//! purpose: The substitution vocabulary consulted before any syllable generation. Maps a
//!     lowercase word form to the replacement word that stands in for it.
//!
//! when-editing:
//!     - !Keys are lowercased on every insert path, including deserialization
//!     - Values keep whatever case they were written with; case mimicry happens later
//!
//! invariants:
//!     - Lookups are case-insensitive on the key
//!     - Keys are unique; a later insert of the same lowercase key replaces the earlier value
//!
//! gotchas:
//!     - An empty replacement value is legal and still counts as a vocabulary hit

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Case-insensitive word → replacement mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    entries: HashMap<String, String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a replacement, returning the value previously stored for the same word
    pub fn insert(
        &mut self,
        word: impl AsRef<str>,
        replacement: impl Into<String>,
    ) -> Option<String> {
        self.entries
            .insert(word.as_ref().to_lowercase(), replacement.into())
    }

    /// Look up the replacement for a word, ignoring its case
    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(&word.to_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Vocabulary
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vocabulary = Self::new();
        for (word, replacement) in iter {
            vocabulary.insert(word, replacement);
        }
        vocabulary
    }
}

impl From<HashMap<String, String>> for Vocabulary {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl<'de> Deserialize<'de> for Vocabulary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = HashMap::<String, String>::deserialize(deserializer)?;
        Ok(map.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        let vocabulary: Vocabulary = [("MAGA", "chaos")].into_iter().collect();
        assert_eq!(vocabulary.get("maga"), Some("chaos"));
        assert_eq!(vocabulary.get("Maga"), Some("chaos"));
        assert_eq!(vocabulary.get("MAGA"), Some("chaos"));
        assert!(vocabulary.get("chaos").is_none());
    }

    #[test]
    fn test_values_keep_case() {
        let mut vocabulary = Vocabulary::new();
        vocabulary.insert("joe", "Biden");
        assert_eq!(vocabulary.get("JOE"), Some("Biden"));
    }

    #[test]
    fn test_insert_replaces_same_word() {
        let mut vocabulary = Vocabulary::new();
        assert!(vocabulary.insert("Fake", "real").is_none());
        assert_eq!(vocabulary.insert("FAKE", "true"), Some("real".to_string()));
        assert_eq!(vocabulary.len(), 1);
        assert_eq!(vocabulary.get("fake"), Some("true"));
    }

    #[test]
    fn test_deserialize_lowercases_keys() {
        let vocabulary: Vocabulary =
            toml::from_str("Covfefe = \"coffee\"\nnews = \"olds\"").unwrap();
        assert_eq!(vocabulary.len(), 2);
        assert!(vocabulary.contains("covfefe"));
        assert_eq!(vocabulary.get("NEWS"), Some("olds"));
    }

    #[test]
    fn test_empty() {
        let vocabulary = Vocabulary::new();
        assert!(vocabulary.is_empty());
        assert!(!vocabulary.contains("anything"));
    }
}
