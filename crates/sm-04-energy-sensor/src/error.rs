//! Error types for the energy sensor

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sensor operations
pub type Result<T> = std::result::Result<T, SensorError>;

/// Errors raised while recording readings
#[derive(Debug, Error)]
pub enum SensorError {
    /// Readings log could not be written
    #[error("Energy log I/O error at {path}: {source}")]
    Io {
        /// Log path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Reading could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
