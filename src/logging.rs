// src/logging.rs
//! Tracing setup: stdout plus one log file per launch under the local data
//! directory. Only the newest `MAX_LOG_FILES` files are kept.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::SystemTime;

use chrono::{Local, NaiveDateTime};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "feedback-sentiment";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("No suitable data directory available for logs")]
    NoDataDir,
    #[error("Failed to prepare log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber. Calling it again is a no-op.
pub fn init() -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let log_dir = log_directory()?;
    fs::create_dir_all(&log_dir).map_err(|source| LoggingError::CreateDir {
        path: log_dir.clone(),
        source,
    })?;

    let file_name = log_file_name(Local::now().naive_local());
    let file_appender = tracing_appender::rolling::never(&log_dir, &file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = Registry::default()
        .with(build_env_filter())
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer));
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!("Logging initialized; log file at {}", log_dir.join(&file_name).display());
    prune_or_warn(&log_dir, MAX_LOG_FILES);
    Ok(())
}

/// Fallback when the log directory is unusable.
pub fn init_stdout_only() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter())
        .try_init();
}

fn log_directory() -> Result<PathBuf, LoggingError> {
    dirs::data_local_dir()
        .map(|dir| dir.join(LOG_FILE_PREFIX).join("logs"))
        .ok_or(LoggingError::NoDataDir)
}

fn log_file_name(now: NaiveDateTime) -> String {
    format!("{LOG_FILE_PREFIX}_{}.log", now.format("%Y-%m-%d_%H-%M-%S"))
}

/// Pruning is housekeeping; a failure never stops logging from starting.
fn prune_or_warn(dir: &Path, max_files: usize) {
    if let Err(err) = prune_old_logs(dir, max_files) {
        tracing::warn!("Failed to prune old logs in {}: {err}", dir.display());
    }
}

/// Removes the oldest `.log` files beyond `max_files`. Files that cannot be
/// removed are skipped; returns how many were deleted.
fn prune_old_logs(dir: &Path, max_files: usize) -> std::io::Result<usize> {
    let mut entries = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .filter(|entry| entry.path().extension().and_then(|ext| ext.to_str()) == Some("log"))
        .map(|entry| {
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, entry.path())
        })
        .collect::<Vec<_>>();

    entries.sort_by_key(|(modified, _)| *modified);
    let excess = entries.len().saturating_sub(max_files);
    let mut removed = 0;
    for (_, path) in entries.into_iter().take(excess) {
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(err) => tracing::warn!("Failed to remove old log file {}: {err}", path.display()),
        }
    }
    Ok(removed)
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
