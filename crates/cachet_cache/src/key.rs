use std::fmt;

use http::Uri;

/// Cache slot identifier: the request's path plus its query string.
///
/// Method, headers and body never take part in the key, so `GET /a?x=1`
/// and `DELETE /a?x=1` share the same slot.
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(path: &str, query: Option<&str>) -> Self {
        let path = if path.is_empty() { "/" } else { path };
        match query {
            Some(q) => Self(format!("{path}?{q}")),
            None => Self(path.to_string()),
        }
    }

    /// Builds the key from a request target. Absolute-form targets
    /// (`http://host/a?b`) are reduced to their path and query.
    pub fn from_uri(uri: &Uri) -> Self {
        Self::new(uri.path(), uri.query())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
