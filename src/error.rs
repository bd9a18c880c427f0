//! Error types for the rlcore crate

use thiserror::Error;

/// Main error type for the rlcore crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid iterate_over '{input}'. Expected one of: {expected}")]
    ParseIterateOver { input: String, expected: String },

    #[error("invalid trace kind '{input}'. Expected one of: {expected}")]
    ParseTraceKind { input: String, expected: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot is missing array '{name}'")]
    MissingArray { name: String },

    #[error("array '{name}' has shape {got:?}, expected {expected:?}")]
    ShapeMismatch {
        name: String,
        got: Vec<usize>,
        expected: Vec<usize>,
    },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
