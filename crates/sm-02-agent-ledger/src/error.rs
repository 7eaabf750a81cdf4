//! Error types for the agent ledger

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur while loading, mutating or persisting the ledger
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Ledger file could not be read or written
    #[error("Ledger I/O error at {path}: {source}")]
    Io {
        /// Ledger (or lock/temp) file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Ledger file exists but is not a ledger document
    #[error("Malformed ledger document at {path}: {reason}")]
    Malformed {
        /// Ledger file path
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Document could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Another writer holds the ledger lock
    #[error("Ledger already in use ({path}){}", .pid.map(|p| format!(" by process {p}")).unwrap_or_default())]
    Locked {
        /// Lock file path
        path: PathBuf,
        /// PID recorded by the holder, if readable
        pid: Option<u32>,
    },

    /// Grant amount is negative or not finite
    #[error("Invalid grant amount: {amount}")]
    InvalidAmount {
        /// Rejected amount
        amount: f64,
    },
}
