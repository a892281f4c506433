//! Telemetry setup
//!
//! Structured tracing for the whole workspace: stderr by default, or a
//! rolling file appender when a log directory is configured. Failures
//! here never propagate into client operations; initialization is
//! best-effort and idempotent.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::EnvFilter;

/// How often the log file rolls over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// One file, never rotated.
    Never,
}

/// Line format for emitted events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line format.
    #[default]
    Full,
    /// Newline-delimited JSON.
    Json,
}

/// Log sink configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Directory for rolling log files; `None` logs to stderr.
    pub directory: Option<PathBuf>,
    /// File-name prefix for rolling log files.
    pub file_prefix: String,
    pub rotation: LogRotation,
    pub format: LogFormat,
    /// Default filter directive when `RUST_LOG` is unset, e.g.
    /// `"permid=debug"`.
    pub filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_prefix: "permid".to_string(),
            rotation: LogRotation::default(),
            format: LogFormat::default(),
            filter: "info".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// File logging into the given directory with defaults otherwise.
    pub fn with_directory(directory: impl Into<PathBuf>) -> Self {
        Self { directory: Some(directory.into()), ..Self::default() }
    }
}

/// Initialize global tracing.
///
/// Returns a worker guard when file logging is enabled; hold it for the
/// lifetime of the process so buffered lines are flushed on shutdown.
/// Calling this twice leaves the first subscriber in place.
pub fn init(config: &TelemetryConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter.clone()));

    match &config.directory {
        Some(directory) => {
            let appender = file_appender(directory, &config.file_prefix, config.rotation);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let builder = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false);
            let _ = match config.format {
                LogFormat::Json => builder.json().try_init(),
                LogFormat::Full => builder.try_init(),
            };
            Some(guard)
        }
        None => {
            let builder =
                tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
            let _ = match config.format {
                LogFormat::Json => builder.json().try_init(),
                LogFormat::Full => builder.try_init(),
            };
            None
        }
    }
}

fn file_appender(
    directory: &Path,
    file_prefix: &str,
    rotation: LogRotation,
) -> RollingFileAppender {
    match rotation {
        LogRotation::Hourly => rolling::hourly(directory, file_prefix),
        LogRotation::Daily => rolling::daily(directory, file_prefix),
        LogRotation::Never => rolling::never(directory, file_prefix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_logs_to_stderr() {
        let config = TelemetryConfig::default();
        assert!(config.directory.is_none());
        assert_eq!(config.rotation, LogRotation::Daily);
        assert_eq!(config.format, LogFormat::Full);
    }

    #[test]
    fn init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = TelemetryConfig::with_directory(dir.path());

        let first = init(&config);
        let second = init(&config);

        // Both calls return guards; only the first installs a subscriber.
        assert!(first.is_some());
        assert!(second.is_some());
    }
}
