mod error;
mod proxy;

pub use error::OriginError;
pub use proxy::{CachingProxy, OriginClient};
