/// =======================================================
/// OUTBOUND REQUEST (miss path)
/// =======================================================
///
/// - URL: origin base + the inbound path and query, verbatim
/// - Method: the inbound method
/// - Headers: inbound headers minus `Host` and hop-by-hop headers
/// - Body: only for methods that carry one (POST, PUT, PATCH)
use bytes::Bytes;
use cachet_cache::CacheKey;
use cachet_http::headers::forwardable_headers;
use http::{header, Method, Request};
use url::Url;

use crate::error::OriginError;

pub(crate) fn forwards_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

pub(crate) fn origin_url(base: &str, key: &CacheKey) -> Result<Url, OriginError> {
    let raw = format!("{base}{key}");
    Url::parse(&raw).map_err(|source| OriginError::InvalidUrl { url: raw, source })
}

pub(crate) fn build_origin_request(
    base: &str,
    key: &CacheKey,
    req: &Request<Bytes>,
) -> Result<reqwest::Request, OriginError> {
    let url = origin_url(base, key)?;
    let mut out = reqwest::Request::new(req.method().clone(), url);

    // The client layer fills in the origin's own Host.
    *out.headers_mut() = forwardable_headers(req.headers(), &[header::HOST]);

    if forwards_body(req.method()) {
        *out.body_mut() = Some(reqwest::Body::from(req.body().clone()));
    }

    Ok(out)
}
