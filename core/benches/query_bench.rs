use criterion::{criterion_group, criterion_main, Criterion};
use search_core::{process_queries, DocumentStatus, Execution, SearchIndex};

const WORDS: &[&str] = &[
    "funny", "pet", "nasty", "rat", "curly", "hair", "fancy", "collar", "big", "dog", "cat", "tail", "sparrow",
    "white", "black", "grey", "small", "loud", "quiet", "old", "young", "green", "eyes", "long",
];

fn corpus(docs: usize) -> SearchIndex {
    let mut idx = SearchIndex::from_stop_words_text("and with in at").unwrap();
    let mut seed = 17usize;
    for id in 0..docs {
        let text: Vec<&str> = (0..10)
            .map(|_| {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                WORDS[(seed >> 8) % WORDS.len()]
            })
            .collect();
        idx.add_document(id as i32, &text.join(" "), DocumentStatus::Actual, &[1, 2, 3]).unwrap();
    }
    idx
}

fn bench_queries(c: &mut Criterion) {
    let idx = corpus(10_000);
    let query = "curly nasty cat big dog -collar -young";
    c.bench_function("find_top_sequential", |b| {
        b.iter(|| idx.find_top_documents_with(Execution::Sequential, query, |_, _, _| true).unwrap())
    });
    c.bench_function("find_top_parallel", |b| {
        b.iter(|| idx.find_top_documents_with(Execution::Parallel, query, |_, _, _| true).unwrap())
    });

    let queries: Vec<String> = WORDS.windows(3).map(|w| w.join(" ")).collect();
    c.bench_function("process_queries", |b| b.iter(|| process_queries(&idx, &queries).unwrap()));
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
