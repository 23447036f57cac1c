use std::path::PathBuf;

use thiserror::Error;

/// Failures outside the story state. The story itself has no error
/// kinds; its operations report outcomes instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("could not read {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not open log file {}: {source}", .path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid log filter {directive:?}: {reason}")]
    LogFilter { directive: String, reason: String },
}
