use std::fmt;
use std::time::Duration;

use crate::key::CacheKey;
use crate::store::CacheStore;

/// Pluggable eviction layered over the store. The lookup path never consults
/// a policy; something has to call [`EvictionPolicy::evict`] periodically.
pub trait EvictionPolicy: Send + Sync + fmt::Debug {
    /// Removes the records this policy considers stale and returns their keys.
    fn evict(&self, store: &CacheStore) -> Vec<CacheKey>;
}

/// Drops records older than a fixed time-to-live.
#[derive(Debug, Clone)]
pub struct TtlPolicy {
    ttl: Duration,
}

impl TtlPolicy {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl EvictionPolicy for TtlPolicy {
    fn evict(&self, store: &CacheStore) -> Vec<CacheKey> {
        store.remove_if(|_, record| record.is_older_than(self.ttl))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use bytes::Bytes;
    use http::{HeaderMap, StatusCode};

    use super::{EvictionPolicy, TtlPolicy};
    use crate::{CacheKey, CacheRecord, CacheStore};

    fn record() -> Arc<CacheRecord> {
        Arc::new(CacheRecord::new(StatusCode::OK, HeaderMap::new(), Bytes::new()))
    }

    #[test]
    fn ttl_policy_evicts_only_stale_records() {
        let ttl = Duration::from_millis(50);
        let store = CacheStore::new();
        store.set(CacheKey::new("/stale", None), record());
        thread::sleep(ttl * 2);
        store.set(CacheKey::new("/fresh", None), record());

        let evicted = TtlPolicy::new(ttl).evict(&store);

        assert_eq!(evicted, vec![CacheKey::new("/stale", None)]);
        assert!(store.has(&CacheKey::new("/fresh", None)));
        assert!(!store.has(&CacheKey::new("/stale", None)));
    }

    #[test]
    fn ttl_policy_on_empty_store_is_noop() {
        let store = CacheStore::new();
        let policy = TtlPolicy::new(Duration::from_secs(1));
        assert!(policy.evict(&store).is_empty());
    }
}
