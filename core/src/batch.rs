//! Independent queries evaluated in parallel against one index.

use crate::document::ScoredDocument;
use crate::error::Result;
use crate::index::SearchIndex;
use rayon::prelude::*;

/// One ranked list per query, in input order.
pub fn process_queries<S>(index: &SearchIndex, queries: &[S]) -> Result<Vec<Vec<ScoredDocument>>>
where
    S: AsRef<str> + Sync,
{
    let results = queries
        .par_iter()
        .map(|q| index.find_top_documents(q.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    tracing::info!(queries = queries.len(), "batch processed");
    Ok(results)
}

/// All results of query 0 in ranked order, then those of query 1, and so on.
/// Evaluation runs in parallel; the merge is an ordered concatenation.
pub fn process_queries_joined<S>(index: &SearchIndex, queries: &[S]) -> Result<Vec<ScoredDocument>>
where
    S: AsRef<str> + Sync,
{
    let joined = queries
        .par_iter()
        .map(|q| index.find_top_documents(q.as_ref()))
        .try_reduce(Vec::new, |mut lhs, rhs| {
            lhs.extend(rhs);
            Ok(lhs)
        })?;
    tracing::info!(queries = queries.len(), results = joined.len(), "joined batch processed");
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentId, DocumentStatus, SearchError};

    fn corpus() -> SearchIndex {
        let mut idx = SearchIndex::from_stop_words_text("and with").unwrap();
        let texts = [
            "funny pet and nasty rat",
            "funny pet with curly hair",
            "funny pet and not very nasty rat",
            "pet with rat and rat and rat",
            "nasty rat with curly hair",
        ];
        for (id, text) in texts.iter().enumerate() {
            idx.add_document(id as DocumentId + 1, text, DocumentStatus::Actual, &[1, 2]).unwrap();
        }
        idx
    }

    #[test]
    fn one_list_per_query() {
        let idx = corpus();
        let queries = ["nasty rat -not", "not very funny nasty pet", "curly hair"];
        let results = process_queries(&idx, &queries).unwrap();
        let sizes: Vec<usize> = results.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 5, 2]);
        for (query, result) in queries.iter().zip(&results) {
            assert_eq!(result, &idx.find_top_documents(query).unwrap());
        }
    }

    #[test]
    fn joined_is_ordered_concatenation() {
        let idx = corpus();
        let queries: Vec<String> = ["nasty rat -not", "not very funny nasty pet", "curly hair"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let joined = process_queries_joined(&idx, &queries).unwrap();
        let expected: Vec<ScoredDocument> = process_queries(&idx, &queries).unwrap().into_iter().flatten().collect();
        assert_eq!(joined, expected);
        assert_eq!(joined.len(), 10);
    }

    #[test]
    fn empty_batch() {
        let idx = corpus();
        let none: [&str; 0] = [];
        assert!(process_queries(&idx, &none).unwrap().is_empty());
        assert!(process_queries_joined(&idx, &none).unwrap().is_empty());
    }

    #[test]
    fn bad_query_fails_the_batch() {
        let idx = corpus();
        let err = process_queries(&idx, &["rat", "--rat"]).unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery { .. }));
    }
}
