//! Error types for the API client.
//!
//! # Design
//! Only failures that stop a call before it reaches the network are errors.
//! A non-2xx status is ordinary response data, and a transport failure is
//! turned into a `Network Error` sentinel response by the client, so neither
//! shows up here.

use thiserror::Error;

/// Errors returned by `ApiClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No base URL has been configured for the session.
    #[error("no API base URL configured")]
    Configuration,

    /// User input was rejected before anything was stored or sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("URL is empty")]
    EmptyUrl,

    /// The input did not parse as an absolute URL (usually a missing scheme).
    #[error("invalid URL {input:?}: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("config value is empty")]
    EmptyValue,
}

/// Failure reported by a `Transport` when no HTTP response was received.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's top-level message omits the cause ("error sending request").
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self { message }
    }
}
