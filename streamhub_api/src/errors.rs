//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body did not match the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),
    /// The configured base URL cannot be combined with an endpoint path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
