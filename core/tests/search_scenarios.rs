use search_core::{process_queries_joined, remove_duplicates, DocumentId, DocumentStatus, Execution, SearchError, SearchIndex};

fn pet_corpus() -> SearchIndex {
    let mut idx = SearchIndex::from_stop_words(["и", "в", "на"]).unwrap();
    idx.add_document(0, "белый кот и модный ошейник", DocumentStatus::Actual, &[8, -3]).unwrap();
    idx.add_document(1, "пушистый кот пушистый хвост", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
    idx.add_document(2, "ухоженный пёс выразительные глаза", DocumentStatus::Actual, &[5, -12, 2, 1]).unwrap();
    idx.add_document(3, "ухоженный скворец евгений", DocumentStatus::Banned, &[9]).unwrap();
    idx
}

#[test]
fn ranks_pet_corpus() {
    let idx = pet_corpus();
    let found = idx.find_top_documents("пушистый ухоженный кот").unwrap();
    let ids: Vec<DocumentId> = found.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![1, 0, 2]);
    assert!(found[0].relevance > found[1].relevance);
    assert!((found[1].relevance - found[2].relevance).abs() < 1e-6);
    assert_eq!(found[0].rating, 5);
}

#[test]
fn ranks_pet_corpus_in_parallel() {
    let idx = pet_corpus();
    let found = idx
        .find_top_documents_with(Execution::Parallel, "пушистый ухоженный кот", |_, status, _| {
            status == DocumentStatus::Actual
        })
        .unwrap();
    let ids: Vec<DocumentId> = found.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![1, 0, 2]);
}

#[test]
fn rejected_ids_leave_no_trace() {
    let mut idx = pet_corpus();
    let terms_before = idx.term_count();
    assert_eq!(
        idx.add_document(-1, "новое слово", DocumentStatus::Actual, &[]),
        Err(SearchError::InvalidId { id: -1 })
    );
    assert_eq!(
        idx.add_document(2, "новое слово", DocumentStatus::Actual, &[]),
        Err(SearchError::InvalidId { id: 2 })
    );
    assert!(idx.postings("новое").is_none());
    assert_eq!(idx.term_count(), terms_before);
    assert_eq!(idx.document_count(), 4);
}

#[test]
fn match_with_forbidden_word_keeps_status() {
    let idx = pet_corpus();
    let (words, status) = idx.match_document("пушистый -хвост", 1).unwrap();
    assert!(words.is_empty());
    assert_eq!(status, DocumentStatus::Actual);
}

#[test]
fn forbidden_word_never_returned() {
    let idx = pet_corpus();
    for doc in idx.find_top_documents_by_status("ухоженный пёс -глаза", DocumentStatus::Actual).unwrap() {
        assert!(!idx.word_frequencies(doc.id).contains_key("глаза"));
    }
    assert!(idx.find_top_documents("ухоженный пёс -глаза").unwrap().is_empty());
}

#[test]
fn duplicates_keep_canonical_id() {
    let mut idx = SearchIndex::default();
    idx.add_document(2, "кот хвост кот", DocumentStatus::Actual, &[1]).unwrap();
    idx.add_document(5, "хвост кот", DocumentStatus::Irrelevant, &[4]).unwrap();
    idx.add_document(7, "кот", DocumentStatus::Actual, &[1]).unwrap();
    assert_eq!(remove_duplicates(&mut idx), vec![5]);
    assert!(idx.contains(2));
    assert!(!idx.contains(5));
    assert_eq!(idx.postings("хвост").unwrap().keys().copied().collect::<Vec<_>>(), vec![2]);
}

#[test]
fn removal_shifts_idf() {
    let mut idx = pet_corpus();
    idx.remove_document_with(Execution::Parallel, 0);
    let found = idx.find_top_documents("кот").unwrap();
    assert_eq!(found.len(), 1);
    // only document 1 contains the word, out of three
    let expected = 0.25 * (3.0f64).ln();
    assert!((found[0].relevance - expected).abs() < 1e-12);
}

#[test]
fn joined_batch_serializes() {
    let idx = pet_corpus();
    let joined = process_queries_joined(&idx, &["кот", "пёс"]).unwrap();
    let json = serde_json::to_value(&joined).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[0]["id"], 1);
    assert_eq!(json[2]["id"], 2);
}
