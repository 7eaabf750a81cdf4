//! Adapters connecting the miner to the filesystem

pub mod storage;

pub use storage::{ChainSummary, JsonlChainStore, MemoryChainStore};
