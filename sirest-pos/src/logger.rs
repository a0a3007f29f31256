//! Logging Infrastructure
//!
//! Logs go to stderr so stdout stays free for the rendered screens, or to a
//! daily rolling file when a log directory is configured.

use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing_subscriber::EnvFilter;

/// File name prefix of the rolling log files
pub const LOG_FILE_PREFIX: &str = "sirest-pos";

/// Initialize the logger at `info` on stderr
pub fn init_logger() -> anyhow::Result<()> {
    init_logger_with_file(None, false, None)
}

/// Initialize the logger with optional JSON format and file output.
///
/// `log_level` accepts a level (`debug`) or a full filter directive
/// (`sirest_client=debug,info`). A missing `log_dir` falls back to stderr.
pub fn init_logger_with_file(
    log_level: Option<&str>,
    json: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_new(level).or_else(|_| EnvFilter::try_new("info"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let dir = log_dir.filter(|d| d.exists());
    let result = match (dir, json) {
        (Some(dir), true) => builder
            .json()
            .with_writer(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
            .try_init(),
        (Some(dir), false) => builder
            .with_ansi(false)
            .with_writer(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
            .try_init(),
        (None, true) => builder.json().with_writer(std::io::stderr).try_init(),
        (None, false) => builder.with_writer(std::io::stderr).try_init(),
    };
    result.map_err(|e| anyhow::anyhow!(e))
}

/// Delete rolled log files older than `days`. Returns how many were removed.
pub fn cleanup_old_logs(log_dir: &Path, days: u64) -> std::io::Result<usize> {
    let max_age = Duration::from_secs(days * 24 * 60 * 60);
    let now = SystemTime::now();
    let mut removed = 0;

    for entry in std::fs::read_dir(log_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if !name.to_string_lossy().starts_with(LOG_FILE_PREFIX) {
            continue;
        }
        let meta = entry.metadata()?;
        if !meta.is_file() {
            continue;
        }
        let age = meta
            .modified()
            .ok()
            .and_then(|m| now.duration_since(m).ok())
            .unwrap_or_default();
        if age >= max_age {
            std::fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    if removed > 0 {
        tracing::info!(removed, dir = %log_dir.display(), "Old log files removed");
    }
    Ok(removed)
}
