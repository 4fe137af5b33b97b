use cachet_proxy::CachingProxy;

/// State shared by every connection task of one listener.
#[derive(Debug)]
pub struct AppState {
    pub proxy: CachingProxy,
    /// Inbound body limit in bytes (0 = unlimited).
    pub max_request_body_bytes: u64,
}

impl AppState {
    pub fn new(proxy: CachingProxy, max_request_body_bytes: u64) -> Self {
        Self {
            proxy,
            max_request_body_bytes,
        }
    }
}
