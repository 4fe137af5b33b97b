use std::sync::Arc;

use bytes::Bytes;
use cachet_cache::{CacheError, CacheKey, CacheRecord, CacheStore};
use cachet_config::OriginConfig;
use cachet_http::CacheStatus;
use http::{Request, Response};
use tracing::{debug, error, info, instrument};

use crate::error::OriginError;

mod origin;
mod request;
mod response;

pub use origin::OriginClient;

/// =======================================================
/// CACHING PROXY
/// =======================================================
///
/// Everything a forwarded request needs, shared by every connection
/// task behind an `Arc`:
/// - the response store (also reachable by the clear-cache control route)
/// - the outbound client towards the single origin
///
/// Lookup and insertion are not coordinated: two concurrent misses for the
/// same key both reach the origin and the last writer wins.
#[derive(Debug)]
pub struct CachingProxy {
    store: Arc<CacheStore>,
    origin: OriginClient,
}

impl CachingProxy {
    pub fn new(store: Arc<CacheStore>, origin: OriginClient) -> Self {
        Self { store, origin }
    }

    pub fn from_config(store: Arc<CacheStore>, cfg: &OriginConfig) -> Result<Self, OriginError> {
        Ok(Self::new(store, OriginClient::from_config(cfg)?))
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        &self.store
    }

    pub fn origin(&self) -> &OriginClient {
        &self.origin
    }

    /// Serves one forwarded request: a stored record when there is one,
    /// otherwise an origin fetch that is stored on success.
    #[instrument(
        skip(self, req),
        fields(method = %req.method(), uri = %req.uri())
    )]
    pub async fn handle(&self, req: Request<Bytes>) -> Response<Bytes> {
        let key = CacheKey::from_uri(req.uri());

        if let Some(record) = self.lookup(&key) {
            debug!(target: "cachet::proxy", %key, "Cache hit");
            return response::from_record(&record, CacheStatus::Hit);
        }

        info!(
            target: "cachet::proxy",
            %key,
            origin = %self.origin.base_url(),
            "Cache miss; forwarding to origin"
        );

        match self.fetch_and_store(key, &req).await {
            Ok(record) => response::from_record(&record, CacheStatus::Miss),
            Err(e) => {
                error!(target: "cachet::proxy", error = %e, "Origin fetch failed");
                response::from_error(&e)
            }
        }
    }

    fn lookup(&self, key: &CacheKey) -> Option<Arc<CacheRecord>> {
        if !self.store.has(key) {
            return None;
        }
        // The record may be cleared between `has` and `get`; treat that as a miss.
        match self.store.get(key) {
            Ok(record) => Some(record),
            Err(CacheError::NotFound(_)) => None,
        }
    }

    async fn fetch_and_store(
        &self,
        key: CacheKey,
        req: &Request<Bytes>,
    ) -> Result<Arc<CacheRecord>, OriginError> {
        let outbound = request::build_origin_request(self.origin.base_url(), &key, req)?;
        let fetched = self.origin.fetch(outbound).await?;

        let record = Arc::new(CacheRecord::new(fetched.status, fetched.headers, fetched.body));
        self.store.set(key, Arc::clone(&record));
        Ok(record)
    }
}
