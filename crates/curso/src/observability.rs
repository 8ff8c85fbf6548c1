//! Tracing subscriber initialization.

use crate::config::config_dir;
use curso_error::{ConfigError, CursoResult};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log file name used in TUI mode.
pub const LOG_FILE_NAME: &str = "curso.log";

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Human-readable lines on stderr
    Stderr,
    /// JSON lines on stderr
    StderrJson,
    /// Appended to a file, keeping the terminal free for the UI
    File(PathBuf),
}

impl LogTarget {
    /// File target at `explicit`, or `curso.log` in the config directory,
    /// or in the working directory when there is no config directory.
    pub fn file(explicit: Option<&Path>) -> Self {
        let path = explicit.map(Path::to_path_buf).unwrap_or_else(|| {
            config_dir()
                .map(|dir| dir.join(LOG_FILE_NAME))
                .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
        });
        LogTarget::File(path)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
///
/// # Errors
///
/// Fails when the log file cannot be opened or a subscriber is already set.
pub fn init_logging(target: &LogTarget) -> CursoResult<()> {
    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::StderrJson => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ConfigError::new(format!(
                        "Failed to create log directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    ConfigError::new(format!(
                        "Failed to open log file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed
        .map_err(|e| ConfigError::new(format!("Failed to install tracing subscriber: {}", e)))?;
    info!(log_target = ?target, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_log_file() {
        let target = LogTarget::file(Some(Path::new("/tmp/other.log")));
        assert_eq!(target, LogTarget::File(PathBuf::from("/tmp/other.log")));
    }

    #[test]
    fn test_default_log_file_name() {
        let LogTarget::File(path) = LogTarget::file(None) else {
            panic!("expected a file target");
        };
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(LOG_FILE_NAME));
    }
}
