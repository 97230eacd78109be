//! Logging setup for applications embedding the parley client layer
//!
//! Library code only emits `tracing` events. Applications pick an output
//! mode once at start-up; the default is silent so that embedding UIs don't
//! get stray output on stderr.

use std::str::FromStr;

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Env var selecting the logging mode
pub const LOG_MODE_ENV: &str = "PARLEY_LOG_MODE";

/// Env var overriding the filter directive (falls back to `RUST_LOG`)
pub const LOG_LEVEL_ENV: &str = "PARLEY_LOG_LEVEL";

/// Logging mode for different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoggingMode {
    /// No subscriber installed
    #[default]
    Silent,
    /// Compact stderr output, `info` by default
    Development,
    /// Pretty output with thread ids and source locations, `debug` by default
    Debug,
    /// One JSON object per line, `info` by default
    Json,
}

impl FromStr for LoggingMode {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "silent" | "off" => Ok(LoggingMode::Silent),
            "development" | "dev" => Ok(LoggingMode::Development),
            "debug" => Ok(LoggingMode::Debug),
            "json" => Ok(LoggingMode::Json),
            other => Err(LoggingError::InvalidEnv(format!("{}={}", LOG_MODE_ENV, other))),
        }
    }
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid environment variable: {0}")]
    InvalidEnv(String),
}

/// Install a global subscriber for `mode`
///
/// Fails if a global subscriber is already installed.
///
/// ```rust,ignore
/// parley_broadcast::logging::init_logging(LoggingMode::Development)?;
/// ```
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let result = match mode {
        LoggingMode::Silent => return Ok(()),
        LoggingMode::Development => Registry::default()
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .with(env_filter("info"))
            .try_init(),
        LoggingMode::Debug => Registry::default()
            .with(
                fmt::layer()
                    .pretty()
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(env_filter("debug"))
            .try_init(),
        LoggingMode::Json => Registry::default()
            .with(fmt::layer().json().with_current_span(false))
            .with(env_filter("info"))
            .try_init(),
    };

    result.map_err(|e| LoggingError::TracingInit(e.to_string()))
}

/// Initialize from `PARLEY_LOG_MODE` (silent when unset)
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = match std::env::var(LOG_MODE_ENV) {
        Ok(value) => value.parse()?,
        Err(_) => LoggingMode::Silent,
    };
    init_logging(mode)
}

/// Check whether a global subscriber has been installed
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}

/// Filter from `PARLEY_LOG_LEVEL`, then `RUST_LOG`, then `default_level`
fn env_filter(default_level: &str) -> EnvFilter {
    std::env::var(LOG_LEVEL_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(default_level))
}
