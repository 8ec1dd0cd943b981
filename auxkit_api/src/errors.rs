//! Error types for the API client.

/// Errors that can occur when fetching a page.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The base URL and path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The body was not a page-shaped JSON document.
    #[error("Failed to parse page: {0}")]
    ParseFailed(String),
}
