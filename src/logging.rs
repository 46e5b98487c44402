//! Tracing setup for the binary.
//!
//! The interactive screens own the terminal, so they log to a file under the cache
//! directory; one-shot commands log to stderr. `RUST_LOG` selects the level
//! (default `warn`).

use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::utils::get_cache_dir;

const LOG_FILENAME: &str = "travel-mate.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log to `<cache dir>/travel-mate/travel-mate.log`. Keep the guard alive until exit
/// so buffered lines are flushed.
pub fn init_file() -> Result<WorkerGuard> {
    let dir = get_cache_dir()?;
    fs::create_dir_all(&dir).context("Failed to create log directory")?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILENAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(guard)
}
