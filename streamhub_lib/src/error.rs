//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding input validation failures.
#[derive(Debug)]
pub enum StreamhubError {
    /// An error from the underlying API client.
    Api(streamhub_api::Error),
    /// The backend answered but the payload is unusable (e.g. an empty link).
    Unavailable(String),
    /// User-provided input or configuration failed validation.
    InvalidInput(String),
}

impl fmt::Display for StreamhubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Unavailable(msg) => write!(f, "Unavailable: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for StreamhubError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<streamhub_api::Error> for StreamhubError {
    fn from(e: streamhub_api::Error) -> Self {
        Self::Api(e)
    }
}
