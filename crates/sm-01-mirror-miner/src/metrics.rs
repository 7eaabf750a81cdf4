//! Metrics collection for the mirror miner

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::MinerState;

/// Metrics collector for mining.
///
/// Shared through an `Arc` so another thread can watch a running miner.
#[derive(Debug, Default)]
pub struct MiningMetrics {
    /// Total blocks sealed and appended
    pub blocks_mined: AtomicU64,

    /// Total nonce attempts across all searches (including abandoned ones)
    pub nonce_attempts: AtomicU64,

    /// Total search time (milliseconds)
    pub mining_time_ms: AtomicU64,

    /// Height under search, 0 while idle
    searching_height: AtomicU64,
}

impl MiningMetrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of a search
    pub(crate) fn begin_search(&self, height: u64) {
        self.searching_height.store(height, Ordering::Relaxed);
    }

    /// Mark the end of a search, successful or not
    pub(crate) fn end_search(&self, attempts: u64) {
        self.searching_height.store(0, Ordering::Relaxed);
        self.nonce_attempts.fetch_add(attempts, Ordering::Relaxed);
    }

    /// Record a sealed block
    pub fn record_block(&self, duration_ms: u64) {
        self.blocks_mined.fetch_add(1, Ordering::Relaxed);
        self.mining_time_ms.fetch_add(duration_ms, Ordering::Relaxed);
    }

    /// Current miner state
    pub fn state(&self) -> MinerState {
        match self.searching_height.load(Ordering::Relaxed) {
            0 => MinerState::Idle,
            height => MinerState::Searching { height },
        }
    }

    /// Get blocks mined
    pub fn get_blocks_mined(&self) -> u64 {
        self.blocks_mined.load(Ordering::Relaxed)
    }

    /// Get total attempts
    pub fn get_nonce_attempts(&self) -> u64 {
        self.nonce_attempts.load(Ordering::Relaxed)
    }

    /// Average search time per sealed block, milliseconds
    pub fn get_avg_mining_time_ms(&self) -> f64 {
        let blocks = self.blocks_mined.load(Ordering::Relaxed);
        if blocks == 0 {
            return 0.0;
        }
        self.mining_time_ms.load(Ordering::Relaxed) as f64 / blocks as f64
    }
}
