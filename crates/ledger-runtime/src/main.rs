//! # Asset Ledger Node
//!
//! Loads configuration, starts every component in this process and serves
//! until Ctrl+C.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ledger_runtime::{LedgerRuntime, RuntimeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::load().context("Failed to load configuration")?;

    // Initialize logging
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("Invalid AL_LOG_LEVEL {:?}", config.log_level))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let runtime = LedgerRuntime::new(config).context("Failed to build ledger runtime")?;
    runtime.start().await.context("Failed to start ledger runtime")?;

    info!("Ledger is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;

    Ok(())
}
