use crate::concurrent_map::ConcurrentMap;
use crate::config::{DEFAULT_SHARD_COUNT, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
use crate::document::{DocumentId, DocumentStatus, ScoredDocument};
use crate::error::{Result, SearchError};
use crate::index::{Postings, SearchIndex};
use crate::query::Query;
use crate::terms::Term;
use crate::Execution;
use rayon::prelude::*;
use std::collections::BTreeMap;

impl SearchIndex {
    /// Top documents with status ACTUAL.
    pub fn find_top_documents(&self, text: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_by_status(text, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, text: &str, status: DocumentStatus) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with(Execution::Sequential, text, move |_, s, _| s == status)
    }

    /// Parse, score and rank. `predicate(id, status, rating)` decides which
    /// documents may enter the result at all.
    pub fn find_top_documents_with<P>(&self, execution: Execution, text: &str, predicate: P) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = self.parse_query(execution, text)?;
        let scored = self.score(execution, &query, &predicate);
        Ok(top_k(scored, MAX_RESULT_DOCUMENT_COUNT))
    }

    /// TF-IDF relevance of every document that matches a required word,
    /// passes the predicate, and contains no forbidden word. Unordered.
    pub fn score<P>(&self, execution: Execution, query: &Query, predicate: &P) -> Vec<ScoredDocument>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let relevance = match execution {
            Execution::Sequential => self.accumulate_sequential(query, predicate),
            Execution::Parallel => self.accumulate_parallel(query, predicate),
        };
        relevance
            .into_iter()
            .filter_map(|(id, rel)| self.documents.get(&id).map(|d| ScoredDocument::new(id, rel, d.rating())))
            .collect()
    }

    fn accumulate_sequential<P>(&self, query: &Query, predicate: &P) -> BTreeMap<DocumentId, f64>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let mut relevance = BTreeMap::new();
        for word in &query.required {
            let Some(postings) = self.inverted.get(word.as_str()) else { continue };
            let idf = self.inverse_document_frequency(postings);
            for (&id, &tf) in postings {
                if self.passes(id, predicate) {
                    *relevance.entry(id).or_insert(0.0) += tf * idf;
                }
            }
        }
        for word in &query.forbidden {
            let Some(postings) = self.inverted.get(word.as_str()) else { continue };
            for id in postings.keys() {
                relevance.remove(id);
            }
        }
        relevance
    }

    fn accumulate_parallel<P>(&self, query: &Query, predicate: &P) -> BTreeMap<DocumentId, f64>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let relevance: ConcurrentMap<DocumentId, f64> = ConcurrentMap::new(DEFAULT_SHARD_COUNT);
        query.required.par_iter().for_each(|word| {
            let Some(postings) = self.inverted.get(word.as_str()) else { return };
            let idf = self.inverse_document_frequency(postings);
            for (&id, &tf) in postings {
                if self.passes(id, predicate) {
                    *relevance.access(id) += tf * idf;
                }
            }
        });
        query.forbidden.par_iter().for_each(|word| {
            let Some(postings) = self.inverted.get(word.as_str()) else { return };
            for &id in postings.keys() {
                relevance.erase(id);
            }
        });
        relevance.into_ordinary_map()
    }

    fn passes<P>(&self, id: DocumentId, predicate: &P) -> bool
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        self.documents.get(&id).is_some_and(|d| predicate(id, d.status(), d.rating()))
    }

    fn inverse_document_frequency(&self, postings: &Postings) -> f64 {
        (self.documents.len() as f64 / postings.len() as f64).ln()
    }

    pub fn match_document(&self, text: &str, id: DocumentId) -> Result<(Vec<Term>, DocumentStatus)> {
        self.match_document_with(Execution::Sequential, text, id)
    }

    /// Required words of the query that occur in document `id`, sorted. Empty
    /// if any forbidden word occurs in it. The status is returned either way.
    pub fn match_document_with(&self, execution: Execution, text: &str, id: DocumentId) -> Result<(Vec<Term>, DocumentStatus)> {
        let status = self.documents.get(&id).ok_or(SearchError::UnknownDocument { id })?.status();
        let query = self.parse_query(execution, text)?;

        let indexed_here = |word: &String| -> Option<Term> {
            self.inverted
                .get_key_value(word.as_str())
                .filter(|(_, postings)| postings.contains_key(&id))
                .map(|(term, _)| term.clone())
        };

        let matched = match execution {
            Execution::Sequential => {
                if query.forbidden.iter().any(|w| indexed_here(w).is_some()) {
                    return Ok((Vec::new(), status));
                }
                query.required.iter().filter_map(indexed_here).collect()
            }
            Execution::Parallel => {
                if query.forbidden.par_iter().any(|w| indexed_here(w).is_some()) {
                    return Ok((Vec::new(), status));
                }
                query.required.par_iter().filter_map(indexed_here).collect()
            }
        };
        Ok((matched, status))
    }
}

/// Order by relevance descending. A document starts a tie group together
/// with every following document less than [`RELEVANCE_EPSILON`] below it; a
/// group is ordered by rating descending, then relevance, then id.
///
/// Groups are measured from their first member, so any two documents more
/// than the tolerance apart always keep relevance order. Two neighbours from
/// adjacent groups may still be closer than the tolerance without being
/// reordered by rating; no order satisfies the pairwise rule for every input.
pub fn rank(mut docs: Vec<ScoredDocument>) -> Vec<ScoredDocument> {
    docs.sort_by(|a, b| b.relevance.total_cmp(&a.relevance).then(a.id.cmp(&b.id)));
    let mut start = 0;
    while start < docs.len() {
        let head = docs[start].relevance;
        let end = docs[start..]
            .iter()
            .position(|d| head - d.relevance >= RELEVANCE_EPSILON)
            .map_or(docs.len(), |offset| start + offset);
        docs[start..end].sort_by(|a, b| {
            b.rating
                .cmp(&a.rating)
                .then(b.relevance.total_cmp(&a.relevance))
                .then(a.id.cmp(&b.id))
        });
        start = end;
    }
    docs
}

pub fn top_k(docs: Vec<ScoredDocument>, k: usize) -> Vec<ScoredDocument> {
    let mut ranked = rank(docs);
    ranked.truncate(k);
    ranked
}
