//! Entry point for the chores HTTP server.
//!
//! Initializes logging, reads configuration from the environment, selects a
//! storage backend, and serves until SIGINT or SIGTERM.

use chores::{config::Config, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "chores=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    info!("config: {}", config.dump());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(config))?;
    Ok(())
}
