//! Domain entities for the mirror miner

use serde::{Deserialize, Serialize};

use crate::utils::hashing::{meets_difficulty, miner_address};

/// `previous_hash` recorded for the first block of a chain file
pub const GENESIS_PREVIOUS_HASH: &str = "unknown";

/// `previous_hash` recorded for every block after the first.
///
/// Linkage is cosmetic: the miner never reads back the prior block.
pub const PLACEHOLDER_PREVIOUS_HASH: &str = "0000...";

/// Quantum state tag stamped on every sealed block
pub const SEALED_QUANTUM_STATE: &str = "superposition|mined⟩";

/// A sealed mirror block.
///
/// Produced once by the miner and never mutated afterwards; one of these
/// is serialized per line of the chain file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block number (height), starting at 1
    pub height: u64,

    /// Hex digest satisfying `difficulty`
    pub hash: String,

    /// Placeholder reference to the prior block
    pub previous_hash: String,

    /// UNIX seconds captured before the nonce search
    pub timestamp: i64,

    /// Winning nonce
    pub nonce: u64,

    /// Leading `'0'` hex characters required
    pub difficulty: u32,

    /// Wall-clock seconds spent searching
    pub mining_time: f64,

    /// Mirror BTC credited for this block
    pub reward: f64,

    /// Cosmetic miner identity derived from the hash
    pub miner_address: String,

    /// Always [`SEALED_QUANTUM_STATE`]
    pub quantum_state: String,
}

/// Winning attempt of a nonce search
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attempt {
    /// Nonce that produced `hash`
    pub nonce: u64,
    /// Hex digest of `prefix || nonce`
    pub hash: String,
}

impl Block {
    /// Seal a block from the winning attempt.
    pub fn seal(
        height: u64,
        timestamp: i64,
        difficulty: u32,
        attempt: Attempt,
        mining_time: f64,
        reward: f64,
    ) -> Self {
        let previous_hash = if height > 1 {
            PLACEHOLDER_PREVIOUS_HASH
        } else {
            GENESIS_PREVIOUS_HASH
        };

        Self {
            height,
            miner_address: miner_address(&attempt.hash),
            hash: attempt.hash,
            previous_hash: previous_hash.to_string(),
            timestamp,
            nonce: attempt.nonce,
            difficulty,
            mining_time,
            reward,
            quantum_state: SEALED_QUANTUM_STATE.to_string(),
        }
    }

    /// Check the block's own hash against its recorded difficulty
    pub fn satisfies_difficulty(&self) -> bool {
        meets_difficulty(&self.hash, self.difficulty)
    }
}

/// Observable miner state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MinerState {
    /// No search in progress
    Idle,
    /// Nonce sweep active for `height`
    Searching {
        /// Height being mined
        height: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(hash: &str) -> Attempt {
        Attempt {
            nonce: 9,
            hash: hash.to_string(),
        }
    }

    #[test]
    fn test_first_block_uses_genesis_sentinel() {
        let block = Block::seal(1, 1_700_000_000, 2, attempt("00ab"), 0.1, 50.0);
        assert_eq!(block.previous_hash, GENESIS_PREVIOUS_HASH);
        assert_eq!(block.quantum_state, SEALED_QUANTUM_STATE);
        assert!(block.miner_address.starts_with("quantum_miner_"));
    }

    #[test]
    fn test_later_blocks_use_placeholder() {
        let block = Block::seal(2, 1_700_000_000, 2, attempt("00ab"), 0.1, 50.0);
        assert_eq!(block.previous_hash, PLACEHOLDER_PREVIOUS_HASH);
    }

    #[test]
    fn test_satisfies_difficulty() {
        assert!(Block::seal(1, 0, 2, attempt("00ab"), 0.0, 50.0).satisfies_difficulty());
        assert!(!Block::seal(1, 0, 3, attempt("00ab"), 0.0, 50.0).satisfies_difficulty());
    }

    #[test]
    fn test_block_json_field_names() {
        let block = Block::seal(1, 5, 1, attempt("0a"), 0.5, 50.0);
        let json = serde_json::to_value(&block).unwrap();
        for key in [
            "height",
            "hash",
            "previous_hash",
            "timestamp",
            "nonce",
            "difficulty",
            "mining_time",
            "reward",
            "miner_address",
            "quantum_state",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
