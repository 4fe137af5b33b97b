use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::validation::{validate, ConfigReport};
use crate::{CacheConfig, CliArgs, ConfigError, LogConfig, OriginConfig, ServerConfig};

/// Prefix of environment overrides, e.g. `CACHET_SERVER__PORT=3000`.
pub const ENV_PREFIX: &str = "CACHET";

// =======================================================
// CACHET CONFIG (root)
// =======================================================
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CachetConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub origin: OriginConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl CachetConfig {
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    pub fn origin(&self) -> &OriginConfig {
        &self.origin
    }

    pub fn cache(&self) -> &CacheConfig {
        &self.cache
    }

    pub fn log(&self) -> &LogConfig {
        &self.log
    }

    /// Validate the configuration and return a report of warnings and errors.
    pub fn validate(&self) -> ConfigReport {
        validate(self)
    }

    /// Builds the effective configuration: defaults, then the optional config
    /// file, then `CACHET_*` environment variables, then CLI flags.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        Self::load_with_env(cli, Self::environment())
    }

    fn load_with_env(cli: &CliArgs, env: config::Environment) -> Result<Self, ConfigError> {
        let mut cfg = Self::from_sources(cli.config_file.as_deref(), env)?;
        cfg.apply_cli(cli);
        cfg.apply_defaults();

        if cfg.server.port == 0 || cfg.origin.url.is_empty() {
            return Err(ConfigError::MissingRequired);
        }

        let report = cfg.validate();
        if report.has_errors() {
            return Err(ConfigError::Invalid(report.format()));
        }
        for warning in report.warnings() {
            warn!(target: "cachet::config", "{warning}");
        }

        Ok(cfg)
    }

    /// `CACHET_SERVER__PORT` -> `server.port`: a single `_` after the prefix,
    /// `__` between nested keys.
    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn from_sources(
        file: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder.add_source(env).build()?.try_deserialize()
    }

    fn apply_cli(&mut self, cli: &CliArgs) {
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(origin) = &cli.origin {
            self.origin.url = origin.clone();
        }
        if cli.clear_cache {
            self.cache.clear_on_startup = true;
        }
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(level) = &cli.log_level {
            self.log.level = level.clone();
        }
        if let Some(secs) = cli.origin_timeout_secs {
            self.origin.timeout_secs = secs;
        }
        if let Some(secs) = cli.cache_ttl_secs {
            self.cache.ttl_secs = Some(secs);
        }
    }

    fn apply_defaults(&mut self) {
        self.server.apply_defaults_from(&ServerConfig::default());
        self.origin.apply_defaults_from(&OriginConfig::default());
        self.cache.apply_defaults_from(&CacheConfig::default());
        self.log.apply_defaults_from(&LogConfig::default());
    }

    /// Logs the effective configuration once the subscriber is installed.
    pub fn log_summary(&self) {
        info!(
            target: "cachet::config",
            listen = %self.server.listen_addr(),
            max_connections = self.server.max_connections,
            max_request_body_bytes = self.server.max_request_body_bytes,
            "[server]"
        );
        info!(
            target: "cachet::config",
            url = %self.origin.url,
            connect_timeout_secs = self.origin.connect_timeout_secs,
            timeout_secs = self.origin.timeout_secs,
            max_redirects = self.origin.max_redirects,
            max_response_body_bytes = self.origin.max_response_body_bytes,
            "[origin]"
        );
        info!(
            target: "cachet::config",
            clear_on_startup = self.cache.clear_on_startup,
            ttl_secs = ?self.cache.ttl_secs,
            sweep_interval_secs = self.cache.sweep_interval_secs,
            "[cache]"
        );
    }
}
