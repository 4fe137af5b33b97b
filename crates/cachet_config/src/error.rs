use thiserror::Error;

/// Fatal configuration problems; the process must not bind a listener.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Both --port and --origin options are required")]
    MissingRequired,

    #[error("failed to load configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("invalid configuration:\n{0}")]
    Invalid(String),
}
