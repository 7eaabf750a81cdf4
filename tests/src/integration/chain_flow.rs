//! # Chain Flow
//!
//! Miner (sm-01) writing through the JSONL adapter, read back through the
//! chain reader the `supply` report uses.

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use tokio::sync::watch;

    use sm_01_mirror_miner::{
        last_height, read_chain, summarize, JsonlChainStore, Miner, MinerConfig,
        GENESIS_PREVIOUS_HASH, PLACEHOLDER_PREVIOUS_HASH,
    };

    fn config(difficulty: u32) -> MinerConfig {
        MinerConfig {
            difficulty,
            block_interval_ms: 0,
            max_attempts: None,
        }
    }

    #[test]
    fn test_three_blocks_at_difficulty_two() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mirror_chain.jsonl");
        let mut miner = Miner::new(config(2), Box::new(JsonlChainStore::new(&path)));

        for _ in 0..3 {
            miner.mine_block(2).unwrap();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);

        let blocks = read_chain(&path).unwrap();
        let heights: Vec<u64> = blocks.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![1, 2, 3]);
        assert!(blocks.iter().all(|b| b.hash.starts_with("00")));
        assert!(blocks.iter().all(|b| b.satisfies_difficulty()));
        assert_eq!(blocks[0].previous_hash, GENESIS_PREVIOUS_HASH);
        assert_eq!(blocks[2].previous_hash, PLACEHOLDER_PREVIOUS_HASH);
    }

    #[test]
    fn test_separate_miners_keep_heights_contiguous() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mirror_chain.jsonl");

        let mut first = Miner::new(config(1), Box::new(JsonlChainStore::new(&path)));
        first.mine_block(1).unwrap();
        first.mine_block(1).unwrap();
        drop(first);

        let tip = last_height(&path).unwrap();
        let mut second =
            Miner::resume_from(config(1), Box::new(JsonlChainStore::new(&path)), tip);
        let block = second.mine_block(1).unwrap();

        assert_eq!(block.height, 3);
        let summary = summarize(&path).unwrap();
        assert_eq!(summary.blocks, 3);
        assert_eq!(summary.tip_height, 3);
        assert_eq!(summary.total_reward, 150.0);
    }

    #[test]
    fn test_continuous_mining_writes_every_block() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("chain.jsonl");
        let mut miner = Miner::new(config(1), Box::new(JsonlChainStore::new(&path)));
        let (_tx, rx) = watch::channel(false);

        let blocks = miner.continuous_mining(4, &rx).unwrap();

        assert_eq!(blocks.len(), 4);
        assert_eq!(read_chain(&path).unwrap(), blocks);
        assert_eq!(miner.metrics().get_blocks_mined(), 4);
    }
}
