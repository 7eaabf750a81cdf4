//! Outbound ports (driven side - SPI)

use crate::domain::Block;
use crate::error::Result;

/// Port: append-only persistence of sealed blocks.
///
/// There is deliberately no read, rewrite or compaction operation here;
/// the miner only ever appends.
pub trait ChainStore: Send {
    /// Persist one sealed block. A failure loses the block.
    fn append(&mut self, block: &Block) -> Result<()>;

    /// Human-readable location, used in logs
    fn location(&self) -> String;
}
