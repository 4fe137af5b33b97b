use std::sync::Arc;

use cachet_cache::TtlPolicy;
use cachet_proxy::CachingProxy;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::info;

use super::Master;
use crate::structs::AppState;
use crate::sweeper::spawn_sweeper;

impl Master {
    pub(super) fn log_startup(&self, listen: &str) {
        info!(
            target: "cachet::master",
            %listen,
            origin = %self.cfg.origin.url(),
            "Caching proxy listening"
        );
    }

    /// One-off clear requested with `--clear-cache`; runs before the first accept.
    pub(super) fn prepare_store(&self) {
        if self.cfg.cache.clear_on_startup() {
            let removed = self.store.clear();
            info!(target: "cachet::cache", removed, "Cache cleared on startup");
        }
    }

    pub(super) fn start_sweeper(&self) -> Option<JoinHandle<()>> {
        let ttl = self.cfg.cache.ttl()?;
        Some(spawn_sweeper(
            Arc::clone(&self.store),
            Arc::new(TtlPolicy::new(ttl)),
            self.cfg.cache.sweep_interval(),
        ))
    }

    pub(super) fn init_semaphore(&self) -> Arc<Semaphore> {
        let max_conns = self.cfg.server.max_connections();
        let semaphore = Arc::new(Semaphore::new(max_conns));
        info!(
            target: "cachet::master",
            max_conns,
            "Global connection semaphore initialized"
        );
        semaphore
    }

    pub(super) fn build_state(&self) -> anyhow::Result<Arc<AppState>> {
        let proxy = CachingProxy::from_config(Arc::clone(&self.store), &self.cfg.origin)?;
        Ok(Arc::new(AppState::new(
            proxy,
            self.cfg.server.max_request_body_bytes(),
        )))
    }
}
