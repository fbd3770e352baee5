//! Error types for semantic search.

use abode_core::error::AbodeError;

/// Errors from embedding and ranking.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The embedding provider failed or refused the input. Ranking never
    /// falls back to lexical matching; the failure is surfaced as-is.
    #[error("embedding provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// A stored embedding's dimension differs from the query vector's.
    /// Fatal for the whole ranking call, never a per-entry skip: a mixed
    /// index means the store was built against a different model.
    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Knowledge store failure; propagated, not retried.
    #[error("store unavailable: {0}")]
    Store(String),
}

impl From<AbodeError> for SearchError {
    fn from(err: AbodeError) -> Self {
        SearchError::Store(err.to_string())
    }
}

impl From<SearchError> for AbodeError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Store(msg) => AbodeError::StoreUnavailable(msg),
            other => AbodeError::Search(other.to_string()),
        }
    }
}
