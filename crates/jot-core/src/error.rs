//! Error types for jot-core

use thiserror::Error;

/// Result type alias using jot-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in jot-core operations
///
/// Every variant terminates at the component boundary as a single displayed
/// string; none are retried automatically and none are fatal.
#[derive(Error, Debug)]
pub enum Error {
    /// Empty note content, rejected before any network call
    #[error("Note content cannot be empty.")]
    EmptyContent,

    /// Transport failure (connection refused, DNS, request build)
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; carries the backend's error message when one was
    /// present in the body, otherwise the synthesized status-line message
    #[error("{0}")]
    Api(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
