use http::Method;
use tracing::debug;

/// Methods forwarded to the origin, as advertised in `Allow`.
///
/// HEAD is not forwarded and gets 405: its bodiless reply must never land
/// under the method-insensitive key that later GETs read.
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, PATCH, DELETE";

const CLEAR_CACHE_PATH: &str = "/clear-cache";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `POST /clear-cache`: handled locally, never forwarded.
    ClearCache,
    /// Everything else with a supported method goes through the pipeline.
    Forward,
    MethodNotAllowed,
}

/// Picks the handler for a request. The control route is checked first so
/// that it shadows the wildcard forwarding route.
pub fn route(method: &Method, path: &str) -> Route {
    let route = if *method == Method::POST && is_clear_cache_path(path) {
        Route::ClearCache
    } else if matches!(
        *method,
        Method::GET | Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    ) {
        Route::Forward
    } else {
        Route::MethodNotAllowed
    };

    debug!(target: "cachet::worker", %method, %path, ?route, "Routed request");
    route
}

fn is_clear_cache_path(path: &str) -> bool {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    trimmed.eq_ignore_ascii_case(CLEAR_CACHE_PATH)
}
