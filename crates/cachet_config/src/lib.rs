mod cache;
mod cachet;
mod cli;
mod error;
mod log;
mod origin;
mod server;
mod validation;

pub use cache::CacheConfig;
pub use cachet::{CachetConfig, ENV_PREFIX};
pub use cli::CliArgs;
pub use error::ConfigError;
pub use log::LogConfig;
pub use origin::OriginConfig;
pub use server::ServerConfig;
pub use validation::{validate, ConfigReport};
