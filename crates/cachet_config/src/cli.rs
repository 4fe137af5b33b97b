use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the cachet binary.
///
/// Every flag is optional here; `--port` and `--origin` become mandatory only
/// after the config file and environment layers had their say.
#[derive(Debug, Default, Clone, Parser)]
#[command(
    name = "cachet",
    version,
    about = "Caching reverse proxy: forwards to one origin and replays cached responses"
)]
pub struct CliArgs {
    /// Port on which the caching proxy will listen.
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the server requests are forwarded to.
    #[arg(long, value_name = "URL")]
    pub origin: Option<String>,

    /// Clear the cache on startup.
    #[arg(long = "clear-cache", action = clap::ArgAction::SetTrue)]
    pub clear_cache: bool,

    /// Optional path to a configuration file (TOML, YAML or JSON).
    #[arg(long = "config-file", env = "CACHET_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Override the listener host.
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Override the outbound request timeout towards the origin.
    #[arg(long = "origin-timeout-seconds", value_name = "SECONDS")]
    pub origin_timeout_secs: Option<u64>,

    /// Evict cached records older than this many seconds.
    #[arg(long = "cache-ttl-seconds", value_name = "SECONDS")]
    pub cache_ttl_secs: Option<u64>,
}
