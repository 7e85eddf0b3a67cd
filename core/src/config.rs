//! Tuning constants for the search index.

/// Number of documents returned by a top-K query.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevance values closer than this are ranked as a tie and ordered by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Shard count of the accumulator used by parallel scoring.
pub const DEFAULT_SHARD_COUNT: usize = 64;

/// Number of most recent requests tracked by [`crate::RequestQueue`] (one per minute of a day).
pub const REQUEST_WINDOW: usize = 1440;
