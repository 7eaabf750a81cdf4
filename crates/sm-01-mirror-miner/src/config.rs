//! Configuration types for the mirror miner

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime configuration for the miner
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MinerConfig {
    /// Difficulty used by continuous mining (default: 4)
    pub difficulty: u32,

    /// Pause between blocks in continuous mining, milliseconds (default: 1000)
    pub block_interval_ms: u64,

    /// Upper bound on nonce attempts per block.
    ///
    /// `None` (default) keeps the search unbounded: under a high enough
    /// difficulty it never returns.
    pub max_attempts: Option<u64>,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            difficulty: crate::DEFAULT_DIFFICULTY,
            block_interval_ms: 1_000,
            max_attempts: None,
        }
    }
}

impl MinerConfig {
    /// Pause between blocks
    pub fn block_interval(&self) -> Duration {
        Duration::from_millis(self.block_interval_ms)
    }
}
