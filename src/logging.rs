use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Diagnostics go to a file in the config directory so the terminal
/// screen stays owned by the UI. Filtering follows the HAOWISE_LOG
/// environment variable; only warnings are recorded by default.
pub fn init(config_home: &Path) -> Result<()> {
    let log_path = config_home.join("haowise.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_env("HAOWISE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    // try_init so repeated initialization (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(())
}
