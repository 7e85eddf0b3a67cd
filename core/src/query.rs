use crate::error::{Result, SearchError};
use crate::index::SearchIndex;
use crate::tokenizer::{is_valid_word, split_words};
use crate::Execution;
use rayon::prelude::*;
use std::collections::BTreeSet;

/// A parsed query: words that score a document and words that exclude it.
/// Stop words never reach either set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub required: BTreeSet<String>,
    pub forbidden: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryWord<'a> {
    Required(&'a str),
    Forbidden(&'a str),
}

impl SearchIndex {
    /// Parse raw query text. Both execution modes produce the same sets.
    pub fn parse_query(&self, execution: Execution, text: &str) -> Result<Query> {
        let words: Vec<QueryWord<'_>> = match execution {
            Execution::Sequential => split_words(text)
                .filter_map(|w| self.parse_query_word(w).transpose())
                .collect::<Result<_>>()?,
            Execution::Parallel => split_words(text)
                .collect::<Vec<_>>()
                .into_par_iter()
                .filter_map(|w| self.parse_query_word(w).transpose())
                .collect::<Result<_>>()?,
        };

        let mut query = Query::default();
        for word in words {
            match word {
                QueryWord::Required(w) => query.required.insert(w.to_string()),
                QueryWord::Forbidden(w) => query.forbidden.insert(w.to_string()),
            };
        }
        Ok(query)
    }

    /// `None` for stop words.
    fn parse_query_word<'a>(&self, raw: &'a str) -> Result<Option<QueryWord<'a>>> {
        let (word, forbidden) = match raw.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (raw, false),
        };
        if word.is_empty() {
            return Err(SearchError::InvalidQuery { word: raw.to_string(), reason: "empty minus word" });
        }
        if forbidden && word.starts_with('-') {
            return Err(SearchError::InvalidQuery { word: raw.to_string(), reason: "double minus" });
        }
        if !is_valid_word(word) {
            return Err(SearchError::InvalidTerm { term: raw.to_string() });
        }
        if self.is_stop_word(word) {
            return Ok(None);
        }
        Ok(Some(if forbidden { QueryWord::Forbidden(word) } else { QueryWord::Required(word) }))
    }
}
