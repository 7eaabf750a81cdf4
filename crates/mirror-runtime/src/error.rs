//! Runtime error types

use std::path::PathBuf;
use thiserror::Error;

use sm_01_mirror_miner::MinerError;
use sm_02_agent_ledger::LedgerError;
use sm_03_ai_cycle::AiCycleError;
use sm_04_energy_sensor::SensorError;

/// Result type alias for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors surfaced by the orchestrator and configuration loader
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration file could not be read
    #[error("Cannot read config {path}: {source}")]
    ConfigIo {
        /// Config path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file or override is invalid
    #[error("Invalid config {origin}: {reason}")]
    Config {
        /// File path or environment variable name
        origin: String,
        /// What was wrong
        reason: String,
    },

    /// Mining failed
    #[error(transparent)]
    Miner(#[from] MinerError),

    /// Ledger failed
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Idea pass failed
    #[error(transparent)]
    AiCycle(#[from] AiCycleError),

    /// Energy monitor failed
    #[error(transparent)]
    Sensor(#[from] SensorError),

    /// A worker task panicked or was aborted
    #[error("{worker} worker did not complete: {source}")]
    Worker {
        /// Worker name
        worker: &'static str,
        /// Join failure
        #[source]
        source: tokio::task::JoinError,
    },
}
