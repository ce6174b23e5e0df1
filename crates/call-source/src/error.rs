//! Record source error types.

use thiserror::Error;

/// Record source errors.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Transport failure talking to the live endpoint
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Payload was valid JSON but not a recognizable record collection
    #[error("unexpected payload shape: {0}")]
    UnexpectedShape(String),

    /// Payload could not be parsed as JSON
    #[error("payload decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for record source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
