//! Tracing setup
//!
//! Full-screen commands own the terminal, so they log to a file instead.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to stderr (non-interactive commands)
pub fn init_stderr() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}

/// Log to `<data_dir>/gander/gander.log`, returning the path
pub fn init_file() -> Result<PathBuf> {
    let dir = dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("gander");
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let path = dir.join("gander.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .init();
    Ok(path)
}
