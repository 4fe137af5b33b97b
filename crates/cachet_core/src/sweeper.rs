use std::{sync::Arc, time::Duration};

use cachet_cache::{CacheStore, EvictionPolicy};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

/// Runs `policy` against `store` every `every` until the task is aborted.
pub fn spawn_sweeper(
    store: Arc<CacheStore>,
    policy: Arc<dyn EvictionPolicy>,
    every: Duration,
) -> JoinHandle<()> {
    info!(
        target: "cachet::cache",
        ?policy,
        interval_secs = every.as_secs(),
        "Eviction sweeper started"
    );

    tokio::spawn(async move {
        let mut ticker = time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let evicted = policy.evict(&store);
            if evicted.is_empty() {
                debug!(target: "cachet::cache", remaining = store.len(), "Sweep found nothing to evict");
            } else {
                info!(
                    target: "cachet::cache",
                    evicted = evicted.len(),
                    remaining = store.len(),
                    "Evicted stale records"
                );
            }
        }
    })
}
