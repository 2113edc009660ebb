//! Logging bootstrap.
//!
//! # Responsibility
//! - Start a stderr logger exactly once per process.
//! - Keep core events in a stable `event=... module=...` key/value shape.
//!
//! # Invariants
//! - Initialization is idempotent for the same level.
//! - Re-initialization with a different level is rejected.
//! - Initialization never panics.

use flexi_logger::{Logger, LoggerHandle};
use log::info;
use std::sync::Mutex;
use thiserror::Error;

static LOGGING_STATE: Mutex<Option<LoggingState>> = Mutex::new(None);

struct LoggingState {
    level: &'static str,
    _logger: LoggerHandle,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    #[error("unsupported log level `{0}`; expected trace|debug|info|warn|error")]
    UnsupportedLevel(String),

    #[error("logging already initialized with level `{active}`; refusing to switch to `{requested}`")]
    LevelConflict {
        active: &'static str,
        requested: &'static str,
    },

    #[error("failed to start logger: {0}")]
    Backend(String),
}

/// Initializes logging at `level`.
///
/// # Errors
/// - [`LoggingError::UnsupportedLevel`] for unknown level names.
/// - [`LoggingError::LevelConflict`] when already running at another level.
/// - [`LoggingError::Backend`] when the logger cannot be installed.
pub fn init_logging(level: &str) -> Result<(), LoggingError> {
    let level = normalize_level(level)?;
    let mut state = LOGGING_STATE
        .lock()
        .map_err(|_| LoggingError::Backend("logging state lock poisoned".to_string()))?;

    if let Some(active) = state.as_ref() {
        if active.level != level {
            return Err(LoggingError::LevelConflict {
                active: active.level,
                requested: level,
            });
        }
        return Ok(());
    }

    let logger = Logger::try_with_str(level)
        .map_err(|err| LoggingError::Backend(err.to_string()))?
        .log_to_stderr()
        .format_for_stderr(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    info!(
        "event=app_start module=core status=ok platform={} build_mode={} version={} level={}",
        std::env::consts::OS,
        build_mode(),
        env!("CARGO_PKG_VERSION"),
        level
    );

    *state = Some(LoggingState {
        level,
        _logger: logger,
    });
    Ok(())
}

/// Active level, or `None` before initialization.
pub fn logging_status() -> Option<&'static str> {
    LOGGING_STATE
        .lock()
        .ok()
        .and_then(|state| state.as_ref().map(|state| state.level))
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

pub(crate) fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}

fn build_mode() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
