use thiserror::Error;

use crate::key::CacheKey;

#[derive(Debug, Error)]
pub enum CacheError {
    /// No record for the key. Callers treat this as a miss.
    #[error("no cached record for {0}")]
    NotFound(CacheKey),
}
