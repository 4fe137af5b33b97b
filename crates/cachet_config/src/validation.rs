use std::net::IpAddr;

use url::Url;

use crate::CachetConfig;

/// Validation output for a loaded cachet configuration.
#[derive(Debug, Default)]
pub struct ConfigReport {
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl ConfigReport {
    /// Returns true when no errors were found.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true when at least one error was found.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Render warnings and errors into a readable, multi-line string.
    pub fn format(&self) -> String {
        let mut out = String::new();
        if !self.errors.is_empty() {
            out.push_str("Errors:\n");
            for err in &self.errors {
                out.push_str("  - ");
                out.push_str(err);
                out.push('\n');
            }
        }
        if !self.warnings.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str("Warnings:\n");
            for warn in &self.warnings {
                out.push_str("  - ");
                out.push_str(warn);
                out.push('\n');
            }
        }
        out
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }
}

/// Validate a cachet configuration and return a report of issues.
///
/// Missing port/origin are not reported here; `CachetConfig::load` turns
/// them into a dedicated error before validation runs.
pub fn validate(cfg: &CachetConfig) -> ConfigReport {
    let mut report = ConfigReport::default();

    validate_server(cfg, &mut report);
    validate_origin(cfg, &mut report);
    validate_cache(cfg, &mut report);

    report
}

fn validate_server(cfg: &CachetConfig, report: &mut ConfigReport) {
    let host = cfg.server.host.trim();
    if host.is_empty() {
        report.error("server.host is empty");
    } else if host.parse::<IpAddr>().is_err() && host != "localhost" {
        report.warn(format!(
            "server.host '{host}' is not an IP address; DNS resolution will be used"
        ));
    }

    if cfg.server.max_request_body_bytes == 0 {
        report.warn("server.max_request_body_bytes is 0; inbound bodies are unbounded");
    }
}

fn validate_origin(cfg: &CachetConfig, report: &mut ConfigReport) {
    let raw = cfg.origin.url.as_str();
    if raw.is_empty() {
        return;
    }

    match Url::parse(raw) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                report.error(format!(
                    "origin.url '{raw}' must use http or https (got '{}')",
                    url.scheme()
                ));
            }
            if url.host_str().is_none() {
                report.error(format!("origin.url '{raw}' has no host"));
            }
            if url.query().is_some() || url.fragment().is_some() {
                report.error(format!(
                    "origin.url '{raw}' must not carry a query string or fragment"
                ));
            }
        }
        Err(e) => report.error(format!("origin.url '{raw}' is not an absolute URL: {e}")),
    }

    if cfg.origin.max_response_body_bytes == 0 {
        report.warn("origin.max_response_body_bytes is 0; origin bodies are unbounded");
    }
}

fn validate_cache(cfg: &CachetConfig, report: &mut ConfigReport) {
    if cfg.cache.ttl_secs == Some(0) {
        report.warn("cache.ttl_secs is 0; eviction is disabled");
    }

    if let Some(ttl) = cfg.cache.ttl_secs.filter(|t| *t > 0) {
        if cfg.cache.sweep_interval_secs > ttl {
            report.warn(format!(
                "cache.sweep_interval_secs ({}) exceeds cache.ttl_secs ({ttl}); records may outlive their TTL",
                cfg.cache.sweep_interval_secs
            ));
        }
    }
}
