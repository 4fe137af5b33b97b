use std::time::Duration;

use serde::Deserialize;

// =======================================================
// CACHE CONFIG + DEFAULTS
// =======================================================
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// Clear the store once before the listener accepts traffic.
    pub clear_on_startup: bool,
    /// Optional TTL; when unset records live until cleared.
    pub ttl_secs: Option<u64>,
    /// How often the TTL sweeper runs.
    pub sweep_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            clear_on_startup: false,
            ttl_secs: None,
            sweep_interval_secs: 30,
        }
    }
}

impl CacheConfig {
    pub fn clear_on_startup(&self) -> bool {
        self.clear_on_startup
    }

    /// The TTL, if eviction is enabled. A zero TTL counts as disabled.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }

    pub(crate) fn apply_defaults_from(&mut self, defaults: &CacheConfig) {
        if self.sweep_interval_secs == 0 {
            self.sweep_interval_secs = defaults.sweep_interval_secs;
        }
    }
}
