use serde::Deserialize;

// =======================================================
// LOG CONFIG + DEFAULTS
// =======================================================
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl LogConfig {
    pub fn level(&self) -> &str {
        &self.level
    }

    pub(crate) fn apply_defaults_from(&mut self, defaults: &LogConfig) {
        if self.level.trim().is_empty() {
            self.level = defaults.level.clone();
        }
    }
}
