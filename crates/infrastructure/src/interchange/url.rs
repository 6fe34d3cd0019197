//! Raw URL decomposition and reassembly for the `url` object.

/// Cursor over a string that yields the non-empty spans between delimiters.
///
/// Each step skips at most one delimiter, so runs of delimiters produce no
/// empty tokens.
struct Tokens<'a> {
    rest: &'a str,
    delimiter: char,
}

impl<'a> Tokens<'a> {
    const fn new(input: &'a str, delimiter: char) -> Self {
        Self {
            rest: input,
            delimiter,
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while !self.rest.is_empty() {
            let end = self.rest.find(self.delimiter).unwrap_or(self.rest.len());
            let token = &self.rest[..end];
            self.rest = self
                .rest
                .get(end + self.delimiter.len_utf8()..)
                .unwrap_or_default();
            if !token.is_empty() {
                return Some(token);
            }
        }
        None
    }
}

/// The pieces of a raw URL, borrowed from it.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UrlParts<'a> {
    pub protocol: Option<&'a str>,
    pub host: Vec<&'a str>,
    pub port: Option<&'a str>,
    pub path: Vec<&'a str>,
    pub query: Vec<(&'a str, &'a str)>,
    pub hash: Option<&'a str>,
}

/// Splits `raw` into scheme, dot-separated host, slash-separated path,
/// `&`/`=` separated query pairs and fragment.
pub fn decompose(raw: &str) -> UrlParts<'_> {
    let (rest, hash) = match raw.split_once('#') {
        Some((rest, hash)) => (rest, Some(hash)),
        None => (raw, None),
    };
    let (rest, query) = match rest.split_once('?') {
        Some((rest, query)) => (rest, query),
        None => (rest, ""),
    };
    let (protocol, rest) = match rest.split_once("://") {
        Some((protocol, rest)) => (Some(protocol), rest),
        None => (None, rest),
    };
    let (authority, path) = match rest.find('/') {
        Some(slash) => rest.split_at(slash),
        None => (rest, ""),
    };
    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            (host, Some(port))
        }
        _ => (authority, None),
    };

    UrlParts {
        protocol,
        host: Tokens::new(host, '.').collect(),
        port,
        path: Tokens::new(path, '/').collect(),
        query: Tokens::new(query, '&')
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .collect(),
        hash,
    }
}

/// Rebuilds a raw URL from the object form when `raw` is missing.
///
/// Disabled query parameters are left out.
pub fn reassemble<'a>(
    protocol: Option<&str>,
    host: &[String],
    port: Option<&str>,
    path: &[String],
    query: impl IntoIterator<Item = (&'a str, Option<&'a str>)>,
    hash: Option<&str>,
) -> String {
    let mut url = String::new();
    if let Some(protocol) = protocol {
        url.push_str(protocol);
        url.push_str("://");
    }
    url.push_str(&host.join("."));
    if let Some(port) = port {
        url.push(':');
        url.push_str(port);
    }
    for segment in path {
        url.push('/');
        url.push_str(segment.trim_start_matches('/'));
    }

    let mut separator = '?';
    for (key, value) in query {
        url.push(separator);
        url.push_str(key);
        if let Some(value) = value {
            url.push('=');
            url.push_str(value);
        }
        separator = '&';
    }

    if let Some(hash) = hash {
        url.push('#');
        url.push_str(hash);
    }
    url
}
