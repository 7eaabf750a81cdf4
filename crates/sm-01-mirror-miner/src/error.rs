//! Error types for the mirror miner

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mining operations
pub type Result<T> = std::result::Result<T, MinerError>;

/// Errors that can occur while mining or touching the chain file
#[derive(Debug, Error)]
pub enum MinerError {
    /// Chain file could not be opened, written or read
    #[error("Chain I/O error at {path}: {source}")]
    ChainIo {
        /// Chain file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A line of the chain file is not a block record
    #[error("Corrupt chain record at {path}:{line}: {reason}")]
    CorruptRecord {
        /// Chain file path
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Parser message
        reason: String,
    },

    /// Block could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Opt-in attempt bound reached without a valid nonce
    #[error("Nonce search exhausted at height {height} after {attempts} attempts")]
    SearchExhausted {
        /// Height that was being mined
        height: u64,
        /// Attempts made
        attempts: u64,
    },

    /// Shutdown signalled during the search
    #[error("Mining cancelled at height {height}")]
    Cancelled {
        /// Height that was being mined
        height: u64,
    },
}

impl MinerError {
    /// Check if the miner can keep going after this error.
    ///
    /// Nothing was sealed on a bounded or cancelled search, so the height
    /// counter is still consistent with the chain file.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::SearchExhausted { .. } | Self::Cancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_recoverability() {
        assert!(MinerError::Cancelled { height: 3 }.is_recoverable());
        assert!(MinerError::SearchExhausted {
            height: 1,
            attempts: 10
        }
        .is_recoverable());
        assert!(!MinerError::ChainIo {
            path: PathBuf::from("mirror_chain.jsonl"),
            source: std::io::Error::other("disk full"),
        }
        .is_recoverable());
    }
}
