use std::time::{Duration, Instant};

use bytes::Bytes;
use http::{HeaderMap, StatusCode};

/// One origin response as it was captured on a cache miss.
///
/// Records are immutable; a re-fetch stores a new record under the same key.
#[derive(Clone, Debug)]
pub struct CacheRecord {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub created_at: Instant,
}

impl CacheRecord {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
            created_at: Instant::now(),
        }
    }

    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    pub fn is_older_than(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }
}
