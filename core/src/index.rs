use crate::document::{average_rating, DocumentId, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::terms::{Term, TermStore};
use crate::tokenizer::{is_valid_word, split_words, StopWords};
use crate::Execution;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};

pub type TermFrequencies = BTreeMap<Term, f64>;
pub type Postings = BTreeMap<DocumentId, f64>;

static NO_FREQUENCIES: TermFrequencies = BTreeMap::new();

/// Forward-index entry of one live document.
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    rating: i32,
    status: DocumentStatus,
    terms: TermFrequencies,
}

impl DocumentRecord {
    pub fn rating(&self) -> i32 { self.rating }
    pub fn status(&self) -> DocumentStatus { self.status }
    /// term -> occurrences / word count of the document
    pub fn terms(&self) -> &TermFrequencies { &self.terms }
}

/// Forward and inverted index over a set of documents.
///
/// Both halves are updated by the same `&mut self` call, so no reader can see
/// one without the other. Queries take `&self` and may run concurrently with
/// each other; mutations need exclusive access.
#[derive(Debug, Default)]
pub struct SearchIndex {
    stop_words: StopWords,
    pub(crate) terms: TermStore,
    pub(crate) documents: BTreeMap<DocumentId, DocumentRecord>,
    pub(crate) inverted: HashMap<Term, Postings>,
}

impl SearchIndex {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words, ..Self::default() }
    }

    /// Build with stop words given as space-delimited text.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Ok(Self::new(StopWords::from_text(text)?))
    }

    /// Build with stop words given as a collection.
    pub fn from_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::new(StopWords::from_words(words)?))
    }

    pub fn is_stop_word(&self, word: &str) -> bool { self.stop_words.contains(word) }

    pub fn document_count(&self) -> usize { self.documents.len() }

    /// Live document ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.keys().copied()
    }

    pub fn contains(&self, id: DocumentId) -> bool { self.documents.contains_key(&id) }

    pub fn document(&self, id: DocumentId) -> Option<&DocumentRecord> { self.documents.get(&id) }

    /// Term frequencies of a document; empty if the id is unknown.
    pub fn word_frequencies(&self, id: DocumentId) -> &TermFrequencies {
        self.documents.get(&id).map(|d| &d.terms).unwrap_or(&NO_FREQUENCIES)
    }

    /// Documents containing `term`, with the term's frequency in each.
    pub fn postings(&self, term: &str) -> Option<&Postings> { self.inverted.get(term) }

    /// Every inverted-index entry, in no particular order.
    pub fn inverted_entries(&self) -> impl Iterator<Item = (&Term, &Postings)> + '_ {
        self.inverted.iter()
    }

    /// Number of distinct terms across live documents.
    pub fn term_count(&self) -> usize { self.terms.len() }

    pub fn add_document(&mut self, id: DocumentId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if id < 0 || self.documents.contains_key(&id) {
            return Err(SearchError::InvalidId { id });
        }

        // validate and stage everything before touching the index
        let mut words = Vec::new();
        for word in split_words(text) {
            if !is_valid_word(word) {
                return Err(SearchError::InvalidTerm { term: word.to_string() });
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        let mut staged: BTreeMap<&str, f64> = BTreeMap::new();
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for &word in &words {
                *staged.entry(word).or_insert(0.0) += inv_word_count;
            }
        }

        let mut terms = TermFrequencies::new();
        for (word, tf) in staged {
            let term = self.terms.acquire(word);
            self.inverted.entry(term.clone()).or_default().insert(id, tf);
            terms.insert(term, tf);
        }
        tracing::debug!(id, terms = terms.len(), %status, "document added");
        self.documents.insert(id, DocumentRecord { rating: average_rating(ratings), status, terms });
        Ok(())
    }

    /// Remove a document from both halves. Unknown ids are a no-op.
    pub fn remove_document(&mut self, id: DocumentId) {
        self.remove_document_with(Execution::Sequential, id)
    }

    pub fn remove_document_with(&mut self, execution: Execution, id: DocumentId) {
        let Some(record) = self.documents.remove(&id) else {
            return;
        };

        match execution {
            Execution::Sequential => {
                for term in record.terms.keys() {
                    if let Some(postings) = self.inverted.get_mut(term) {
                        postings.remove(&id);
                    }
                }
            }
            Execution::Parallel => {
                let mut detached: Vec<(Term, Postings)> = record
                    .terms
                    .keys()
                    .filter_map(|term| self.inverted.remove_entry(term))
                    .collect();
                detached.par_iter_mut().for_each(|(_, postings)| {
                    postings.remove(&id);
                });
                self.inverted.extend(detached);
            }
        }

        for term in record.terms.keys() {
            if self.inverted.get(term).is_some_and(|p| p.is_empty()) {
                self.inverted.remove(term);
            }
            self.terms.release(term);
        }
        tracing::debug!(id, terms = record.terms.len(), "document removed");
    }
}
