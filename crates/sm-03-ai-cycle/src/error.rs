//! Error types for the AI cycle

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for AI cycle operations
pub type Result<T> = std::result::Result<T, AiCycleError>;

/// Errors that can occur during an idea-processing pass
#[derive(Debug, Error)]
pub enum AiCycleError {
    /// Ideas or outputs file could not be read or written
    #[error("AI cycle I/O error at {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Output record could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
