//! Mirror miner service
//!
//! Owns the height counter and the chain store. Each call to
//! [`Miner::mine_block`] runs the full search on the calling thread; run it
//! on a blocking pool when called from async code.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::MinerConfig;
use crate::domain::{search, Block, SearchLimits, SearchOutcome};
use crate::error::{MinerError, Result};
use crate::metrics::MiningMetrics;
use crate::ports::ChainStore;
use crate::utils::hashing::mining_prefix;
use crate::BLOCK_REWARD;

/// Granularity of the inter-block pause, so shutdown is noticed promptly
const PAUSE_SLICE: Duration = Duration::from_millis(50);

/// Proof-of-Work miner for the mirror chain.
///
/// The height counter is owned here and is *not* derived from the chain
/// store. Use [`Miner::resume_from`] when appending to an existing file.
pub struct Miner {
    config: MinerConfig,
    height: u64,
    chain: Box<dyn ChainStore>,
    metrics: Arc<MiningMetrics>,
}

impl Miner {
    /// Create a miner starting at height 0 (next block is height 1)
    pub fn new(config: MinerConfig, chain: Box<dyn ChainStore>) -> Self {
        Self::resume_from(config, chain, 0)
    }

    /// Create a miner whose next block is `height + 1`
    pub fn resume_from(config: MinerConfig, chain: Box<dyn ChainStore>, height: u64) -> Self {
        info!(
            "[sm-01] Miner ready: chain={}, next height={}, difficulty={}",
            chain.location(),
            height + 1,
            config.difficulty
        );
        Self {
            config,
            height,
            chain,
            metrics: Arc::new(MiningMetrics::new()),
        }
    }

    /// Height of the last sealed block (0 if none)
    pub fn height(&self) -> u64 {
        self.height
    }

    /// Miner configuration
    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    /// Shared metrics handle, readable while a search runs
    pub fn metrics(&self) -> Arc<MiningMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Mine one block at `difficulty` and append it to the chain.
    ///
    /// Unbounded unless `max_attempts` is configured: at a high enough
    /// difficulty this never returns.
    pub fn mine_block(&mut self, difficulty: u32) -> Result<Block> {
        self.mine_with(difficulty, &|| false)
    }

    /// Mine `count` blocks at the configured difficulty, pausing
    /// `block_interval` between blocks.
    ///
    /// Returns the blocks sealed before `shutdown` fired, if it did.
    pub fn continuous_mining(
        &mut self,
        count: u64,
        shutdown: &watch::Receiver<bool>,
    ) -> Result<Vec<Block>> {
        info!("[sm-01] Starting continuous mining: {} blocks", count);
        let stop = || *shutdown.borrow();
        let mut mined = Vec::new();

        for index in 0..count {
            if stop() {
                break;
            }
            if index > 0 && !self.pause(&stop) {
                break;
            }
            match self.mine_with(self.config.difficulty, &stop) {
                Ok(block) => mined.push(block),
                Err(MinerError::Cancelled { height }) => {
                    warn!("[sm-01] Mining cancelled at height {}", height);
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "[sm-01] Continuous mining finished: {}/{} blocks",
            mined.len(),
            count
        );
        Ok(mined)
    }

    fn mine_with(&mut self, difficulty: u32, should_stop: &dyn Fn() -> bool) -> Result<Block> {
        self.height += 1;
        let height = self.height;
        let timestamp = chrono::Utc::now().timestamp();
        let prefix = mining_prefix(height, timestamp);
        let limits = SearchLimits {
            max_attempts: self.config.max_attempts,
        };

        debug!(height, difficulty, "[sm-01] Searching for nonce");
        self.metrics.begin_search(height);
        let started = Instant::now();
        let outcome = search(&prefix, difficulty, limits, should_stop);
        let elapsed = started.elapsed();

        let attempt = match outcome {
            SearchOutcome::Found(attempt) => {
                self.metrics.end_search(attempt.nonce + 1);
                attempt
            }
            SearchOutcome::Exhausted { attempts } => {
                self.metrics.end_search(attempts);
                self.height -= 1;
                return Err(MinerError::SearchExhausted { height, attempts });
            }
            SearchOutcome::Cancelled { attempts } => {
                self.metrics.end_search(attempts);
                self.height -= 1;
                return Err(MinerError::Cancelled { height });
            }
        };

        let block = Block::seal(
            height,
            timestamp,
            difficulty,
            attempt,
            elapsed.as_secs_f64(),
            BLOCK_REWARD,
        );
        // A failed append loses the block; the height stays consumed.
        self.chain.append(&block)?;
        self.metrics.record_block(elapsed.as_millis() as u64);

        info!(
            "[sm-01] Block #{} mined: hash={}... nonce={} time={:.3}s reward={}",
            block.height,
            &block.hash[..32],
            block.nonce,
            block.mining_time,
            block.reward
        );
        Ok(block)
    }

    /// Sleep for the block interval; false if shutdown fired meanwhile
    fn pause(&self, should_stop: &dyn Fn() -> bool) -> bool {
        let deadline = Instant::now() + self.config.block_interval();
        loop {
            if should_stop() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            std::thread::sleep(PAUSE_SLICE.min(deadline - now));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{JsonlChainStore, MemoryChainStore};
    use crate::domain::{MinerState, GENESIS_PREVIOUS_HASH, PLACEHOLDER_PREVIOUS_HASH};

    fn fast_config() -> MinerConfig {
        MinerConfig {
            difficulty: 2,
            block_interval_ms: 0,
            max_attempts: None,
        }
    }

    #[test]
    fn test_mine_block_meets_difficulty_and_increments_height() {
        let store = MemoryChainStore::new();
        let mut miner = Miner::new(fast_config(), Box::new(store.clone()));

        for (expected, difficulty) in [(1u64, 1u32), (2, 2), (3, 3)] {
            let block = miner.mine_block(difficulty).unwrap();
            assert_eq!(block.height, expected);
            assert!(block.hash.starts_with(&"0".repeat(difficulty as usize)));
            assert_eq!(block.difficulty, difficulty);
            assert_eq!(block.reward, 50.0);
        }
        assert_eq!(miner.height(), 3);
        assert_eq!(store.blocks().len(), 3);
    }

    #[test]
    fn test_zero_difficulty_uses_nonce_zero() {
        let mut miner = Miner::new(fast_config(), Box::new(MemoryChainStore::new()));
        let block = miner.mine_block(0).unwrap();
        assert_eq!(block.nonce, 0);
        assert_eq!(block.height, 1);
    }

    #[test]
    fn test_previous_hash_is_cosmetic() {
        let mut miner = Miner::new(fast_config(), Box::new(MemoryChainStore::new()));
        let first = miner.mine_block(1).unwrap();
        let second = miner.mine_block(1).unwrap();
        assert_eq!(first.previous_hash, GENESIS_PREVIOUS_HASH);
        assert_eq!(second.previous_hash, PLACEHOLDER_PREVIOUS_HASH);
    }

    #[test]
    fn test_resume_from_existing_height() {
        let mut miner = Miner::resume_from(fast_config(), Box::new(MemoryChainStore::new()), 41);
        assert_eq!(miner.mine_block(1).unwrap().height, 42);
    }

    #[test]
    fn test_bounded_search_rolls_back_height() {
        let config = MinerConfig {
            max_attempts: Some(16),
            ..fast_config()
        };
        let store = MemoryChainStore::new();
        let mut miner = Miner::new(config, Box::new(store.clone()));

        let err = miner.mine_block(64).unwrap_err();
        assert!(matches!(
            err,
            MinerError::SearchExhausted {
                height: 1,
                attempts: 16
            }
        ));
        assert_eq!(miner.height(), 0);
        assert!(store.blocks().is_empty());
        assert_eq!(miner.metrics().state(), MinerState::Idle);
    }

    #[test]
    fn test_continuous_mining_writes_chain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mirror_chain.jsonl");
        let mut miner = Miner::new(fast_config(), Box::new(JsonlChainStore::new(&path)));
        let (_tx, rx) = watch::channel(false);

        let blocks = miner.continuous_mining(3, &rx).unwrap();
        assert_eq!(blocks.len(), 3);

        let chain = crate::adapters::storage::read_chain(&path).unwrap();
        let heights: Vec<u64> = chain.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![1, 2, 3]);
        assert!(chain.iter().all(|b| b.satisfies_difficulty() && b.difficulty == 2));
        assert_eq!(miner.metrics().get_blocks_mined(), 3);
    }

    #[test]
    fn test_continuous_mining_respects_shutdown() {
        let mut miner = Miner::new(fast_config(), Box::new(MemoryChainStore::new()));
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        let blocks = miner.continuous_mining(5, &rx).unwrap();
        assert!(blocks.is_empty());
        assert_eq!(miner.height(), 0);
    }

    #[test]
    fn test_huge_count_with_shutdown_set_returns_empty() {
        let mut miner = Miner::new(fast_config(), Box::new(MemoryChainStore::new()));
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        let blocks = miner.continuous_mining(u64::MAX, &rx).unwrap();
        assert!(blocks.is_empty());
        assert_eq!(miner.height(), 0);
    }

    #[test]
    fn test_zero_count_mines_nothing() {
        let mut miner = Miner::new(fast_config(), Box::new(MemoryChainStore::new()));
        let (_tx, rx) = watch::channel(false);
        assert!(miner.continuous_mining(0, &rx).unwrap().is_empty());
    }
}
