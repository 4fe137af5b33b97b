//! In-memory response cache for the proxy.
//!
//! Records are keyed by request path+query and live until cleared, replaced,
//! or removed by an [`EvictionPolicy`].

mod entry;
mod error;
mod key;
mod policy;
mod store;

pub use entry::CacheRecord;
pub use error::CacheError;
pub use key::CacheKey;
pub use policy::{EvictionPolicy, TtlPolicy};
pub use store::CacheStore;
