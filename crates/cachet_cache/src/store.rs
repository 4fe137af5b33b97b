use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::entry::CacheRecord;
use crate::error::CacheError;
use crate::key::CacheKey;

/// In-memory response store shared by the forwarding pipeline and the
/// clear-cache endpoint.
///
/// Every operation is a short synchronous critical section on one shard of
/// the map; nothing here ever awaits.
#[derive(Debug, Default)]
pub struct CacheStore {
    inner: DashMap<CacheKey, Arc<CacheRecord>>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }

    pub fn has(&self, key: &CacheKey) -> bool {
        self.inner.contains_key(key)
    }

    pub fn get(&self, key: &CacheKey) -> Result<Arc<CacheRecord>, CacheError> {
        self.inner
            .get(key)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| CacheError::NotFound(key.clone()))
    }

    /// Inserts or replaces the record for `key`.
    pub fn set(&self, key: CacheKey, record: Arc<CacheRecord>) {
        debug!(target: "cachet::cache", key = %key, status = %record.status, "Storing record");
        self.inner.insert(key, record);
    }

    pub fn remove(&self, key: &CacheKey) -> Option<Arc<CacheRecord>> {
        self.inner.remove(key).map(|(_, record)| record)
    }

    /// Drops every record and returns how many were present.
    pub fn clear(&self) -> usize {
        let removed = self.inner.len();
        self.inner.clear();
        removed
    }

    /// Removes every record matching `pred` and returns the removed keys.
    pub fn remove_if<F>(&self, pred: F) -> Vec<CacheKey>
    where
        F: Fn(&CacheKey, &CacheRecord) -> bool,
    {
        // Collect first: removing while iterating would deadlock on the shard.
        let candidates: Vec<CacheKey> = self
            .inner
            .iter()
            .filter(|entry| pred(entry.key(), entry.value()))
            .map(|entry| entry.key().clone())
            .collect();

        candidates
            .into_iter()
            .filter(|key| self.inner.remove_if(key, |k, v| pred(k, v)).is_some())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bytes::Bytes;
    use http::{HeaderMap, StatusCode};

    use super::CacheStore;
    use crate::{CacheError, CacheKey, CacheRecord};

    fn record(status: StatusCode, body: &'static str) -> Arc<CacheRecord> {
        Arc::new(CacheRecord::new(status, HeaderMap::new(), Bytes::from_static(body.as_bytes())))
    }

    #[test]
    fn get_on_empty_store_is_not_found() {
        let store = CacheStore::new();
        let key = CacheKey::new("/missing", None);
        assert!(!store.has(&key));
        let err = store.get(&key).unwrap_err();
        assert!(matches!(err, CacheError::NotFound(k) if k == key));
    }

    #[test]
    fn set_then_get_returns_record() {
        let store = CacheStore::new();
        let key = CacheKey::new("/widgets", Some("id=1"));
        store.set(key.clone(), record(StatusCode::OK, "one"));

        assert!(store.has(&key));
        let got = store.get(&key).unwrap();
        assert_eq!(got.status, StatusCode::OK);
        assert_eq!(got.body, Bytes::from_static(b"one"));
    }

    #[test]
    fn set_replaces_existing_record() {
        let store = CacheStore::new();
        let key = CacheKey::new("/widgets", None);
        store.set(key.clone(), record(StatusCode::OK, "old"));
        store.set(key.clone(), record(StatusCode::CREATED, "new"));

        assert_eq!(store.len(), 1);
        let got = store.get(&key).unwrap();
        assert_eq!(got.status, StatusCode::CREATED);
        assert_eq!(got.body, Bytes::from_static(b"new"));
    }

    #[test]
    fn clear_removes_everything_and_is_idempotent() {
        let store = CacheStore::new();
        store.set(CacheKey::new("/a", None), record(StatusCode::OK, "a"));
        store.set(CacheKey::new("/b", None), record(StatusCode::OK, "b"));

        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert_eq!(store.clear(), 0);
    }

    #[test]
    fn has_does_not_create_entries() {
        let store = CacheStore::new();
        let _ = store.has(&CacheKey::new("/a", None));
        assert!(store.is_empty());
    }

    #[test]
    fn remove_if_only_drops_matching_records() {
        let store = CacheStore::new();
        store.set(CacheKey::new("/ok", None), record(StatusCode::OK, "ok"));
        store.set(CacheKey::new("/moved", None), record(StatusCode::MOVED_PERMANENTLY, ""));

        let removed = store.remove_if(|_, rec| rec.status.is_redirection());
        assert_eq!(removed, vec![CacheKey::new("/moved", None)]);
        assert!(store.has(&CacheKey::new("/ok", None)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn concurrent_writers_on_distinct_keys() {
        let store = Arc::new(CacheStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for j in 0..50 {
                        let key = CacheKey::new(&format!("/t{i}/{j}"), None);
                        store.set(key, record(StatusCode::OK, "x"));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len(), 400);
    }
}
