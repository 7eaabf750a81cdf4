use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::Block;
use crate::error::Result;
use crate::ports::ChainStore;

/// In-memory chain store for tests.
///
/// Clones share the block list, so a test can keep one clone after handing
/// the store to a miner.
#[derive(Clone, Default)]
pub struct MemoryChainStore {
    blocks: Arc<Mutex<Vec<Block>>>,
}

impl MemoryChainStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the appended blocks
    pub fn blocks(&self) -> Vec<Block> {
        self.blocks.lock().clone()
    }
}

impl ChainStore for MemoryChainStore {
    fn append(&mut self, block: &Block) -> Result<()> {
        self.blocks.lock().push(block.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
