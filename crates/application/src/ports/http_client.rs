//! HTTP client port
//!
//! The network transport is an external collaborator. It receives an owned
//! request snapshot and runs on a worker thread, so the trait is blocking.

use quire_domain::{Header, RequestSnapshot};

/// Errors reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpClientError {
    /// The URL could not be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The transport gave up waiting.
    #[error("Request timed out")]
    Timeout,

    /// Any other transport failure.
    #[error("Request failed: {0}")]
    Other(String),
}

/// A received HTTP response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Response headers in arrival order
    pub headers: Vec<Header>,
    /// Response body as text
    pub body: String,
}

/// Port for issuing HTTP requests.
pub trait HttpClient: Send + Sync + 'static {
    /// Sends the request and blocks until the response or an error.
    ///
    /// # Errors
    /// Returns `HttpClientError` when the request could not be completed.
    fn execute(&self, snapshot: &RequestSnapshot) -> Result<HttpResponse, HttpClientError>;
}
