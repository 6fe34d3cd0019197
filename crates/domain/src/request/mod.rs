//! HTTP request definitions

mod body;
mod header;
mod method;
mod query;

pub use body::{FormDataField, FormParam, RawLanguage, RequestBody};
pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use query::{QueryArg, base_url, build_url, parse_query_args};

use serde::{Deserialize, Serialize};

/// A single HTTP request as stored in a collection.
///
/// `query_args` mirror the query string of `url`; [`Request::set_url`] keeps
/// them in sync and [`Request::build_url`] goes the other way.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Request {
    /// HTTP method
    #[serde(default)]
    pub method: HttpMethod,
    /// URL as written, may contain `{{variables}}`
    #[serde(default)]
    pub url: String,
    /// Request headers
    #[serde(default)]
    pub headers: Headers,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
    /// Query arguments derived from `url`
    #[serde(default)]
    pub query_args: Vec<QueryArg>,
}

impl Request {
    /// Creates a request with the given method and URL.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        let mut request = Self {
            method,
            ..Self::default()
        };
        request.set_url(url);
        request
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(Header::new(key, value));
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Replaces the URL and re-derives the query arguments from it.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
        self.query_args = parse_query_args(&self.url);
    }

    /// Rebuilds the URL from its base and the enabled query arguments.
    #[must_use]
    pub fn build_url(&self) -> String {
        build_url(base_url(&self.url), &self.query_args)
    }

    /// Returns the content type to send: the explicit header if present,
    /// else the default for the body kind.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .content_type()
            .or_else(|| self.body.content_type())
    }
}
