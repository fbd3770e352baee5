//! Error types for tool-call orchestration.

use abode_core::error::AbodeError;
use abode_search::SearchError;

/// Errors from the orchestration layer itself.
///
/// Domain outcomes the user can act on (ambiguity, conflicts, not-found)
/// are not errors here; they come back as `ToolOutcome` variants. These
/// are the failures the dialogue engine cannot do anything about except
/// apologize.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The tool call failed boundary validation before reaching the core.
    #[error("invalid tool call: {0}")]
    InvalidToolCall(String),

    /// Embedding or ranking infrastructure failure.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Session, catalog, or booking store failure.
    #[error("store unavailable: {0}")]
    Store(String),
}

impl From<AbodeError> for AgentError {
    fn from(err: AbodeError) -> Self {
        AgentError::Store(err.to_string())
    }
}

impl From<AgentError> for AbodeError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Store(msg) => AbodeError::StoreUnavailable(msg),
            other => AbodeError::Session(other.to_string()),
        }
    }
}
