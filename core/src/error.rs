use crate::DocumentId;
use thiserror::Error;

/// Errors returned by index construction, mutation and queries.
///
/// Every failure is detected before the index is touched, so an `Err` never
/// leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Document id is negative or already present.
    #[error("invalid document id {id}")]
    InvalidId { id: DocumentId },

    /// A document word or stop word contains a control character.
    #[error("word {term:?} contains a control character")]
    InvalidTerm { term: String },

    /// Malformed query word.
    #[error("query word {word:?} is invalid: {reason}")]
    InvalidQuery { word: String, reason: &'static str },

    /// No live document has this id.
    #[error("document {id} does not exist")]
    UnknownDocument { id: DocumentId },
}

pub type Result<T> = std::result::Result<T, SearchError>;
