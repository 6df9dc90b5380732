use std::{fs::File, path::Path, sync::Arc};

use anyhow::Context as _;
use tracing::{Level, info};
use tracing_subscriber::{filter::LevelFilter, prelude::*};

/// Sends `tracing` output to `path`; the terminal belongs to the TUI.
pub(crate) fn init(path: &Path, level: Level) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .with(LevelFilter::from_level(level))
        .try_init()
        .context("Failed to install log subscriber")?;

    info!("Logging initialized at level: {}", level);
    Ok(())
}
