//! Logging initialization.
//!
//! Installs a `tracing-subscriber` registry with a console layer and an
//! optional plain-text file layer. `RUST_LOG` overrides the default filter.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Logging options for the binary.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is not set.
    pub level: String,
    /// Append log lines to this file as well as the console.
    pub file: Option<PathBuf>,
    /// Emit JSON on the console instead of human-readable lines.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some(PathBuf::from("bot.log")),
            json: false,
        }
    }
}

impl LogConfig {
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{},hyper=warn,reqwest=warn", self.level))
        })
    }
}

/// Initialize the global tracing subscriber.
///
/// Returns the file writer's guard when a log file is configured; keep it
/// alive until exit so buffered lines are flushed. A log file that cannot be
/// opened is reported with a warning and skipped.
///
/// # Panics
///
/// Panics if the global subscriber has already been set.
pub fn init_logging(config: &LogConfig) -> Option<WorkerGuard> {
    let console = if config.json {
        fmt::layer().json().with_target(false).boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    };

    let mut file_error = None;
    let (file_layer, guard) = match config.file.as_deref().map(file_appender) {
        Some(Ok(appender)) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        Some(Err(err)) => {
            file_error = Some(err);
            (None, None)
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(console)
        .with(file_layer)
        .init();

    if let (Some(err), Some(path)) = (file_error, &config.file) {
        tracing::warn!(
            path = %path.display(),
            error = %err,
            "Cannot open log file, logging to console only"
        );
    }

    guard
}

/// Open `path` for appending, without rotation.
fn file_appender(path: &Path) -> Result<RollingFileAppender, InitError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("bot.log");

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_logs_to_bot_log() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.file, Some(PathBuf::from("bot.log")));
        assert!(!config.json);
    }

    #[test]
    fn test_file_appender_creates_log_file() {
        let dir = std::env::temp_dir().join(format!("futures-bot-log-{}", std::process::id()));
        let path = dir.join("bot.log");

        file_appender(&path).unwrap();
        assert!(path.is_file());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_appender_reports_unusable_path() {
        let blocker =
            std::env::temp_dir().join(format!("futures-bot-blocker-{}", std::process::id()));
        std::fs::write(&blocker, b"not a directory").unwrap();

        assert!(file_appender(&blocker.join("bot.log")).is_err());

        std::fs::remove_file(&blocker).unwrap();
    }
}
