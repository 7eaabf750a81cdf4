//! Ledger store adapters

mod file;
#[cfg(feature = "locking")]
pub mod lock;
mod memory;

pub use file::JsonFileLedgerStore;
#[cfg(feature = "locking")]
pub use lock::LedgerLock;
pub use memory::MemoryLedgerStore;
