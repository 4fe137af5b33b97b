use serde::Deserialize;

// =======================================================
// SERVER (LISTENER) CONFIG + DEFAULTS
// =======================================================
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    /// 0 means "not configured"; validation rejects it.
    pub port: u16,
    /// Global limit of concurrently served client connections.
    pub max_connections: usize,
    /// Inbound request body limit in bytes (0 = unlimited).
    pub max_request_body_bytes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 0,
            max_connections: 1024,
            max_request_body_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn listen_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    pub fn max_request_body_bytes(&self) -> u64 {
        self.max_request_body_bytes
    }

    pub(crate) fn apply_defaults_from(&mut self, defaults: &ServerConfig) {
        if self.host.trim().is_empty() {
            self.host = defaults.host.clone();
        }
        if self.max_connections == 0 {
            self.max_connections = defaults.max_connections;
        }
    }
}
