use crate::error::{Result, SearchError};
use std::collections::HashSet;

/// Split text into words on the space character. Runs of spaces never yield empty words.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|w| !w.is_empty())
}

/// A word is valid if it contains no character below U+0020.
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| c < ' ')
}

/// Immutable stop-word set supplied when the index is built.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Build from raw space-delimited text.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_words(split_words(text))
    }

    /// Build from a prepared collection of words. Empty entries are skipped.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() { continue; }
            if !is_valid_word(word) {
                return Err(SearchError::InvalidTerm { term: word.to_string() });
            }
            set.insert(word.to_string());
        }
        Ok(Self { words: set })
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}
