//! Error types for the news network client.
//!
//! # Design
//! Every failed fetch surfaces as exactly one `NetworkError`. The variants
//! separate where the round-trip broke: before a status line arrived
//! (`Transport`), at the status line (`HttpStatus`), or while reading the
//! body into the expected shape (`Decode`). Nothing here is retried; callers
//! that want retry or backoff match on the variant themselves.

use thiserror::Error;

/// Errors returned by `NewsApi` parse methods and by data source operations.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection, TLS, timeout, or body-read failure.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("decoding response failed: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        NetworkError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        NetworkError::Decode(err.to_string())
    }
}

/// Errors raised while assembling a `NetworkConfig` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    InvalidVar {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}
