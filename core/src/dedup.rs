use crate::document::DocumentId;
use crate::index::SearchIndex;
use crate::terms::Term;
use std::collections::BTreeMap;

/// Remove documents whose set of words equals that of a document with a
/// smaller id. Frequencies are ignored. Returns the removed ids, ascending.
pub fn remove_duplicates(index: &mut SearchIndex) -> Vec<DocumentId> {
    let mut groups: BTreeMap<Vec<Term>, Vec<DocumentId>> = BTreeMap::new();
    for id in index.document_ids() {
        let signature: Vec<Term> = index.word_frequencies(id).keys().cloned().collect();
        groups.entry(signature).or_default().push(id);
    }

    let mut removed: Vec<DocumentId> = groups
        .into_values()
        .flat_map(|ids| ids.into_iter().skip(1))
        .collect();
    removed.sort_unstable();

    for &id in &removed {
        index.remove_document(id);
        tracing::info!(id, "found duplicate document");
    }
    tracing::info!(removed = removed.len(), remaining = index.document_count(), "duplicate removal finished");
    removed
}
