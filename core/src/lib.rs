//! In-memory keyword search over a bounded corpus of short documents.
//!
//! The index keeps a forward half (document -> terms) and an inverted half
//! (term -> documents) in lockstep, ranks documents by TF-IDF, and supports
//! duplicate removal and batched queries.

pub mod batch;
pub mod concurrent_map;
pub mod config;
pub mod dedup;
pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod request_queue;
pub mod search;
pub mod terms;
pub mod tokenizer;

pub use batch::{process_queries, process_queries_joined};
pub use concurrent_map::ConcurrentMap;
pub use dedup::remove_duplicates;
pub use document::{DocumentId, DocumentStatus, ScoredDocument};
pub use error::{Result, SearchError};
pub use index::{DocumentRecord, SearchIndex};
pub use query::Query;
pub use request_queue::RequestQueue;
pub use terms::Term;
pub use tokenizer::StopWords;

/// How a bulk operation distributes its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// Run on the calling thread.
    #[default]
    Sequential,
    /// Fan out over the rayon thread pool, joining before returning.
    Parallel,
}
