//! Error types for the blackjack crate

use thiserror::Error;

/// Main error type for the blackjack crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("invalid card '{token}' (expected one of 2-10, J, Q, K, A)")]
    InvalidCard { token: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("stored value table at '{location}' is unreadable: {message}")]
    StorageCorrupt { location: String, message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("shared agent lock poisoned during {operation}")]
    LockPoisoned { operation: String },

    #[error("invalid result '{input}'. Expected one of: {expected}")]
    ParseOutcome { input: String, expected: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
