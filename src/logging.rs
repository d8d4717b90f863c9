//! File-based logging setup.
//!
//! The UI owns the terminal, so log output goes to a file via a non-blocking
//! appender.  The returned guard must be held for the lifetime of the
//! process or buffered lines are lost on exit.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber writing to `path`.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init(path: &Path) -> Result<WorkerGuard> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .context("log path has no file name")?;
    fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!(
        "─── session started {} ───",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(guard)
}
