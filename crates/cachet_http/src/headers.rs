use std::collections::HashSet;

use http::header::{self, HeaderMap, HeaderName, HeaderValue};

/// =======================================================
/// X-Cache MARKER
/// =======================================================
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Whether a forwarded reply came out of the store or from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }

    pub fn header_value(self) -> HeaderValue {
        HeaderValue::from_static(self.as_str())
    }
}

/// Sets `X-Cache`, replacing any value the origin may have sent.
pub fn mark_cache_status(headers: &mut HeaderMap, status: CacheStatus) {
    headers.insert(X_CACHE, status.header_value());
}

/// =======================================================
/// HOP-BY-HOP HEADERS
/// =======================================================
///
/// These describe a single connection and are never relayed by a proxy.
const HOP_BY_HOP: [HeaderName; 7] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    HeaderName::from_static("proxy-connection"),
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(name)
}

/// Copies `src` minus hop-by-hop headers, the headers named by `Connection`,
/// `Content-Length` (the sending side re-frames the body) and anything listed
/// in `extra_drop`.
pub fn forwardable_headers(src: &HeaderMap, extra_drop: &[HeaderName]) -> HeaderMap {
    let connection_tokens = collect_connection_tokens(src);
    let mut out = HeaderMap::with_capacity(src.len());

    for (name, value) in src.iter() {
        if is_hop_by_hop(name)
            || *name == header::CONTENT_LENGTH
            || extra_drop.contains(name)
            || connection_tokens.contains(name.as_str())
        {
            continue;
        }
        out.append(name.clone(), value.clone());
    }

    out
}

fn collect_connection_tokens(headers: &HeaderMap) -> HashSet<String> {
    headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(split_header_tokens)
        .collect()
}

fn split_header_tokens(value: &str) -> impl Iterator<Item = String> + '_ {
    value.split(',').filter_map(|token| {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(
                trimmed
                    .trim_matches(|c| c == '"' || c == '\'')
                    .to_ascii_lowercase(),
            )
        }
    })
}
