//! Error types for reference resolution.

use abode_core::error::AbodeError;

/// A candidate property surfaced in an ambiguity error.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Candidate {
    pub title: String,
    pub city: String,
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' in {}", self.title, self.city)
    }
}

/// Errors from reference resolution.
///
/// Each variant carries enough structured context for the dialogue engine
/// to build an actionable clarification message without re-querying.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// An ordinal reference was used but the conversation contains no
    /// numbered listing. Distinct from `NotFound`: the caller should tell
    /// the user to search first, not retry title matching.
    #[error("no property listing in the conversation to pick '{reference}' from; search for properties first")]
    NoListingContext { reference: String },

    /// Multiple catalog properties match and the tie-break could not pick
    /// one. Carries up to three candidates for the caller to surface.
    #[error("reference '{reference}' matches {} properties", candidates.len())]
    Ambiguous {
        reference: String,
        candidates: Vec<Candidate>,
    },

    /// No strategy yielded a match. Carries up to five sample catalog
    /// titles as suggestions.
    #[error("no property matching '{reference}'")]
    NotFound {
        reference: String,
        suggestions: Vec<String>,
    },

    /// Catalog store failure; propagated, not retried.
    #[error("store unavailable: {0}")]
    Store(String),
}

impl From<AbodeError> for ResolveError {
    fn from(err: AbodeError) -> Self {
        ResolveError::Store(err.to_string())
    }
}

impl From<ResolveError> for AbodeError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Store(msg) => AbodeError::StoreUnavailable(msg),
            other => AbodeError::Resolve(other.to_string()),
        }
    }
}
