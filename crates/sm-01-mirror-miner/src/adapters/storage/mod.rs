//! Chain store adapters

mod file;
mod memory;
pub mod reader;

pub use file::JsonlChainStore;
pub use memory::MemoryChainStore;
pub use reader::{last_height, read_chain, summarize, ChainSummary};
