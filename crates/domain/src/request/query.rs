//! Query argument types and URL query helpers

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// A query argument key-value pair.
///
/// Supports enable/disable without deletion for UI convenience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryArg {
    /// The argument key
    pub key: String,
    /// The argument value
    pub value: String,
    /// Whether this argument is sent
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl QueryArg {
    /// Creates a new enabled query argument.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates a disabled query argument.
    #[must_use]
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: false,
        }
    }
}

/// Returns the part of `url` before the query string and fragment.
#[must_use]
pub fn base_url(url: &str) -> &str {
    url.find(['?', '#']).map_or(url, |end| &url[..end])
}

/// Splits the query string of `url` into arguments.
///
/// Values are kept as written (no percent-decoding) so that `{{variables}}`
/// survive editing. A pair without `=` yields an empty value; empty pairs
/// (`a=1&&b=2`) are skipped.
#[must_use]
pub fn parse_query_args(url: &str) -> Vec<QueryArg> {
    let Some(start) = url.find('?') else {
        return Vec::new();
    };
    let query = &url[start + 1..];
    let query = query.find('#').map_or(query, |end| &query[..end]);

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => QueryArg::new(key, value),
            None => QueryArg::new(pair, ""),
        })
        .collect()
}

/// Appends the enabled `args` to `base`, percent-encoding keys and values.
#[must_use]
pub fn build_url(base: &str, args: &[QueryArg]) -> String {
    let mut url = base.to_string();
    let mut separator = '?';
    for arg in args.iter().filter(|a| a.enabled) {
        url.push(separator);
        url.extend(form_urlencoded::byte_serialize(arg.key.as_bytes()));
        url.push('=');
        url.extend(form_urlencoded::byte_serialize(arg.value.as_bytes()));
        separator = '&';
    }
    url
}
