use std::sync::Arc;

use cachet_cache::CacheStore;
use cachet_config::CachetConfig;
use tokio::net::TcpListener;
use tracing::{info, instrument};

mod accept;
mod startup;

use accept::{accept_loop, bind_listener};

/// Owns the listener side of the proxy: startup tasks, the accept loop and
/// the state handed to each connection.
pub struct Master {
    cfg: Arc<CachetConfig>,
    store: Arc<CacheStore>,
}

impl Master {
    pub fn new(cfg: CachetConfig, store: Arc<CacheStore>) -> Self {
        Self {
            cfg: Arc::new(cfg),
            store,
        }
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        &self.store
    }

    /// Binds `server.host:server.port` and serves until the accept loop fails.
    #[instrument(skip(self), fields(
        listen = %self.cfg.server.listen_addr(),
        origin = %self.cfg.origin.url(),
    ))]
    pub async fn run(self) -> anyhow::Result<()> {
        let listen = self.cfg.server.listen_addr();
        let listener = bind_listener(&listen).await?;
        self.serve(listener).await
    }

    /// Serves an already bound listener. Startup work (clear, sweeper) happens
    /// before the first connection is accepted.
    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        let listen = listener
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| self.cfg.server.listen_addr());

        info!(target: "cachet::master", "Starting CACHET MASTER");

        self.prepare_store();
        let state = self.build_state()?;
        let semaphore = self.init_semaphore();
        let sweeper = self.start_sweeper();

        self.log_startup(&listen);

        let result = accept_loop(listener, listen, semaphore, state).await;

        if let Some(handle) = sweeper {
            handle.abort();
        }
        result
    }
}
