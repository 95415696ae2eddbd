//! Cyclelog API Server
//!
//! Run with: cargo run --bin cyclelog-api
//!
//! # Configuration
//!
//! Reads `~/.config/cyclelog/config.toml` or `./cyclelog.toml`, or the file
//! named by `CYCLELOG_CONFIG`. Environment variables override file values:
//! - `CYCLELOG_JOURNAL`: Journal file path
//! - `CYCLELOG_API_HOST` / `CYCLELOG_API_PORT`: Bind address
//! - `CYCLELOG_CYCLE_WINDOW`: Periods used for cycle statistics
//! - `CYCLELOG_LOG_LEVEL` / `CYCLELOG_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Overrides the log filter entirely

use anyhow::Context;
use cyclelog::api::{serve, AppState};
use cyclelog::config::Config;
use cyclelog::journal::Journal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var("CYCLELOG_CONFIG") {
        Ok(path) => Config::load_with_env(&PathBuf::from(path))?,
        Err(_) => Config::load_default(),
    };

    config.logging.init()?;

    tracing::info!("Starting Cyclelog API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(journal = %config.journal.path, "Loading journal");

    let journal = Journal::load(Path::new(&config.journal.path))
        .with_context(|| format!("Failed to load journal {}", config.journal.path))?;

    tracing::info!(
        logs = journal.logs().len(),
        periods = journal.periods().len(),
        cycle_window = config.analysis.cycle_window,
        "Journal loaded"
    );

    let state = AppState::new(Arc::new(journal), config.analysis.clone());
    serve(state, &config.api).await?;

    tracing::info!("Cyclelog API server stopped");
    Ok(())
}
