use std::time::Duration;

use serde::Deserialize;

// =======================================================
// ORIGIN CONFIG + DEFAULTS
// =======================================================
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OriginConfig {
    /// Absolute base URL of the origin. Empty means "not configured".
    pub url: String,

    // Timeouts (seconds)
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,

    /// Redirects followed by the outbound client (0 = return 3xx as-is).
    pub max_redirects: usize,

    /// Origin response body limit in bytes (0 = unlimited).
    pub max_response_body_bytes: u64,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            connect_timeout_secs: 5,
            timeout_secs: 30,
            max_redirects: 10,
            max_response_body_bytes: 10 * 1024 * 1024,
        }
    }
}

impl OriginConfig {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    pub fn max_response_body_bytes(&self) -> u64 {
        self.max_response_body_bytes
    }

    pub(crate) fn apply_defaults_from(&mut self, defaults: &OriginConfig) {
        self.url = self.url.trim().trim_end_matches('/').to_string();
        if self.connect_timeout_secs == 0 {
            self.connect_timeout_secs = defaults.connect_timeout_secs;
        }
        if self.timeout_secs == 0 {
            self.timeout_secs = defaults.timeout_secs;
        }
    }
}
