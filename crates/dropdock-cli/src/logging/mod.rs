//! Logging initialization

mod rotate;

pub use rotate::RotatingFile;

use dropdock_core::{DropdockError, Result};
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Minimum level, e.g. `info`
    pub level: String,
    /// Log file path
    pub file: PathBuf,
    /// Size at which the file is rotated
    pub max_bytes: u64,
    /// Rotated files to keep
    pub backup_count: u32,
}

/// Parse a log level name.
///
/// Accepts the tracing names plus `warning`, `critical` and `fatal`.
/// Numeric levels are rejected.
pub fn parse_level(raw: &str) -> Result<Level> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" | "critical" | "fatal" => Ok(Level::ERROR),
        _ => Err(DropdockError::Validation(format!("invalid log level {raw:?}"))),
    }
}

/// Install JSON logging to stderr and to a size-rotated file.
///
/// Both outputs carry the source file and line of each event.
///
/// `RUST_LOG` directives, if set, refine the configured level. The returned
/// guard flushes the file writer when dropped.
pub fn init(settings: &LogSettings) -> Result<WorkerGuard> {
    let level = parse_level(&settings.level)?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let file = RotatingFile::open(&settings.file, settings.max_bytes, settings.backup_count)?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .json()
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .json()
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()
        .map_err(|e| DropdockError::Validation(format!("failed to install logger: {e}")))?;

    Ok(guard)
}
