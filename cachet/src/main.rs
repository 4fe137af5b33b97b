use std::sync::Arc;

use cachet_cache::CacheStore;
use cachet_config::{CachetConfig, CliArgs};
use cachet_core::Master;
use clap::Parser;
use tracing::info;
use utils::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliArgs::parse();

    // Configuration errors are reported before the subscriber exists.
    let cfg = match CachetConfig::load(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    init_tracing(cfg.log().level());
    cfg.log_summary();

    let store = Arc::new(CacheStore::new());
    info!(target: "cachet::master", "In-memory cache store created");

    Master::new(cfg, store).run().await
}
