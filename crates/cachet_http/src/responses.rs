use bytes::Bytes;
use http::header::{self, HeaderValue};
use http::{Response, StatusCode};

pub const SERVER_NAME: &str = concat!("cachet/", env!("CARGO_PKG_VERSION"));

/// A response generated by the proxy itself (never by the origin), tagged
/// with our `Server` header.
pub fn response(status: StatusCode, content_type: &'static str, body: impl Into<Bytes>) -> Response<Bytes> {
    let mut resp = Response::new(body.into());
    *resp.status_mut() = status;
    let headers = resp.headers_mut();
    headers.insert(header::SERVER, HeaderValue::from_static(SERVER_NAME));
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    resp
}

/// Plain-text response.
pub fn text_response(status: StatusCode, body: impl Into<Bytes>) -> Response<Bytes> {
    response(status, "text/plain; charset=utf-8", body)
}

/// JSON response from an already-built value.
pub fn json_response(status: StatusCode, value: &serde_json::Value) -> Response<Bytes> {
    response(status, "application/json; charset=utf-8", value.to_string())
}

pub fn bad_request() -> Response<Bytes> {
    text_response(StatusCode::BAD_REQUEST, "400 Bad Request\n")
}

pub fn payload_too_large() -> Response<Bytes> {
    text_response(StatusCode::PAYLOAD_TOO_LARGE, "413 Payload Too Large\n")
}

pub fn method_not_allowed(allow: &'static str) -> Response<Bytes> {
    let mut resp = text_response(StatusCode::METHOD_NOT_ALLOWED, "405 Method Not Allowed\n");
    resp.headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static(allow));
    resp
}

#[cfg(test)]
mod tests {
    use http::{header, StatusCode};

    use super::{json_response, method_not_allowed, SERVER_NAME};

    #[test]
    fn method_not_allowed_lists_allow_header() {
        let resp = method_not_allowed("GET, POST");
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers().get(header::ALLOW).unwrap(), "GET, POST");
        assert_eq!(resp.headers().get(header::SERVER).unwrap(), SERVER_NAME);
    }

    #[test]
    fn json_response_serializes_value() {
        let resp = json_response(StatusCode::OK, &serde_json::json!({"status": "cleared"}));
        assert_eq!(resp.body().as_ref(), br#"{"status":"cleared"}"#);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json; charset=utf-8"
        );
    }
}
