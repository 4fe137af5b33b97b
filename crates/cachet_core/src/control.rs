//! Operator endpoints served by the proxy itself.

use bytes::Bytes;
use cachet_cache::CacheStore;
use cachet_http::responses::json_response;
use http::{Response, StatusCode};
use serde_json::json;
use tracing::info;

/// Drops every stored record and acknowledges with a JSON body.
///
/// Always succeeds, also on an empty store.
pub fn clear_cache(store: &CacheStore) -> Response<Bytes> {
    let removed = store.clear();

    info!(target: "cachet::control", removed, "Cache cleared");

    json_response(
        StatusCode::OK,
        &json!({
            "status": "cleared",
            "message": "Cache cleared successfully",
            "removed": removed,
        }),
    )
}
