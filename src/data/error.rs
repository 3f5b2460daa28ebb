//! Data loading errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, writing or validating season data files
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse RON in {}: {source}", .path.display())]
    Ron {
        path: PathBuf,
        source: ron::error::SpannedError,
    },

    #[error("failed to parse JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        source: ron::Error,
    },

    #[error("unsupported data file {} (expected .ron or .json)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("invalid data: {0}")]
    Invalid(String),
}
