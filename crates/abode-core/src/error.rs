use thiserror::Error;

/// Top-level error type for the Abode core.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for AbodeError` so that the `?` operator works
/// across crate boundaries. Every variant is recoverable at the caller
/// boundary: the dialogue engine relays the message and asks the user to
/// clarify.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AbodeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Resolution error: {0}")]
    Resolve(String),

    #[error("Booking error: {0}")]
    Booking(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Session error: {0}")]
    Session(String),

    /// Transient store-level failure (connection loss, lock poisoning).
    /// Not retried internally; retry policy belongs to the caller.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for AbodeError {
    fn from(err: toml::de::Error) -> Self {
        AbodeError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AbodeError {
    fn from(err: toml::ser::Error) -> Self {
        AbodeError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AbodeError {
    fn from(err: serde_json::Error) -> Self {
        AbodeError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Abode operations.
pub type Result<T> = std::result::Result<T, AbodeError>;
