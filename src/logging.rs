/// Log setup.
///
/// The terminal is in raw alternate-screen mode while the novel runs, so
/// log lines never go to stdout/stderr. They go to the file named in
/// `[logging] file`, or nowhere.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::AppError;

/// Install the global subscriber. Returns `Ok(false)` when logging is
/// disabled by config.
pub fn init(cfg: &LoggingConfig) -> Result<bool, AppError> {
    let Some(path) = &cfg.file else {
        return Ok(false);
    };

    let filter = build_filter(&cfg.level)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::Log { path: path.clone(), source })?;

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();

    Ok(true)
}

/// `RUST_LOG` wins over the configured level.
fn build_filter(level: &str) -> Result<EnvFilter, AppError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| AppError::LogFilter {
        directive: level.to_string(),
        reason: e.to_string(),
    })
}
