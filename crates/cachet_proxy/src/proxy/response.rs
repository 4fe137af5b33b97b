use bytes::Bytes;
use cachet_cache::CacheRecord;
use cachet_http::headers::{forwardable_headers, mark_cache_status};
use cachet_http::responses::text_response;
use cachet_http::CacheStatus;
use http::Response;

use crate::error::OriginError;

/// Replays a stored record. Hits and misses go through here so both carry
/// exactly the same status, headers and body apart from `X-Cache`.
pub(crate) fn from_record(record: &CacheRecord, cache_status: CacheStatus) -> Response<Bytes> {
    let mut resp = Response::new(record.body.clone());
    *resp.status_mut() = record.status;
    *resp.headers_mut() = forwardable_headers(&record.headers, &[]);
    mark_cache_status(resp.headers_mut(), cache_status);
    resp
}

/// Failure reply: relayed origin status (or 500) with the error text. No `X-Cache`.
pub(crate) fn from_error(err: &OriginError) -> Response<Bytes> {
    text_response(err.status_code(), err.to_string())
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use cachet_cache::CacheRecord;
    use cachet_http::{CacheStatus, X_CACHE};
    use http::{header, HeaderMap, HeaderValue, StatusCode};

    use super::{from_error, from_record};
    use crate::error::OriginError;

    fn record() -> CacheRecord {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("7"));
        headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        CacheRecord::new(StatusCode::CREATED, headers, Bytes::from_static(b"{\"a\":1}"))
    }

    #[test]
    fn record_is_replayed_with_marker() {
        let resp = from_record(&record(), CacheStatus::Hit);
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.body().as_ref(), b"{\"a\":1}");
        assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(resp.headers().get(X_CACHE).unwrap(), "HIT");
    }

    #[test]
    fn framing_headers_are_not_replayed() {
        let resp = from_record(&record(), CacheStatus::Miss);
        assert!(resp.headers().get(header::CONTENT_LENGTH).is_none());
        assert!(resp.headers().get(header::TRANSFER_ENCODING).is_none());
        assert_eq!(resp.headers().get(X_CACHE).unwrap(), "MISS");
    }

    #[test]
    fn error_reply_has_no_marker() {
        let resp = from_error(&OriginError::Status(StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(resp.headers().get(X_CACHE).is_none());
        assert!(!resp.body().is_empty());
    }
}
