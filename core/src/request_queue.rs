use crate::config::REQUEST_WINDOW;
use crate::document::{DocumentId, DocumentStatus, ScoredDocument};
use crate::error::Result;
use crate::index::SearchIndex;
use crate::Execution;
use std::collections::VecDeque;

/// Forwards find requests to an index and remembers, for the most recent
/// [`REQUEST_WINDOW`] of them, which came back empty.
pub struct RequestQueue<'a> {
    index: &'a SearchIndex,
    window: usize,
    requests: VecDeque<bool>,
    no_result: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(index: &'a SearchIndex) -> Self {
        Self::with_window(index, REQUEST_WINDOW)
    }

    pub fn with_window(index: &'a SearchIndex, window: usize) -> Self {
        Self { index, window: window.max(1), requests: VecDeque::new(), no_result: 0 }
    }

    pub fn add_find_request(&mut self, text: &str) -> Result<Vec<ScoredDocument>> {
        self.add_find_request_by_status(text, DocumentStatus::Actual)
    }

    pub fn add_find_request_by_status(&mut self, text: &str, status: DocumentStatus) -> Result<Vec<ScoredDocument>> {
        self.add_find_request_with(text, move |_, s, _| s == status)
    }

    /// Failed requests are not recorded.
    pub fn add_find_request_with<P>(&mut self, text: &str, predicate: P) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let found = self.index.find_top_documents_with(Execution::Sequential, text, predicate)?;
        self.record(found.is_empty());
        Ok(found)
    }

    fn record(&mut self, empty: bool) {
        if self.requests.len() == self.window {
            if let Some(true) = self.requests.pop_front() {
                self.no_result -= 1;
            }
        }
        self.requests.push_back(empty);
        if empty {
            self.no_result += 1;
        }
    }

    /// Requests in the current window that returned nothing.
    pub fn no_result_requests(&self) -> usize { self.no_result }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_empty_results_within_window() {
        let mut idx = SearchIndex::from_stop_words_text("and in at").unwrap();
        idx.add_document(1, "curly cat curly tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
        idx.add_document(2, "curly dog and fancy collar", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
        idx.add_document(3, "big cat fancy collar ", DocumentStatus::Actual, &[1, 2, 8]).unwrap();
        idx.add_document(4, "big dog sparrow Eugene", DocumentStatus::Actual, &[1, 3, 2]).unwrap();
        idx.add_document(5, "big dog sparrow Vasiliy", DocumentStatus::Actual, &[1, 1, 1]).unwrap();

        let mut queue = RequestQueue::new(&idx);
        for _ in 0..1439 {
            queue.add_find_request("empty request").unwrap();
        }
        queue.add_find_request("curly dog").unwrap();
        assert_eq!(queue.no_result_requests(), 1439);
        // pushes out the oldest empty requests
        queue.add_find_request("big collar").unwrap();
        queue.add_find_request("sparrow").unwrap();
        assert_eq!(queue.no_result_requests(), 1437);
    }

    #[test]
    fn invalid_request_is_not_recorded() {
        let idx = SearchIndex::default();
        let mut queue = RequestQueue::with_window(&idx, 3);
        assert!(queue.add_find_request("--x").is_err());
        queue.add_find_request("x").unwrap();
        assert_eq!(queue.no_result_requests(), 1);
    }
}
