//! Outbound ports (driven side - SPI)

use crate::domain::LedgerDocument;
use crate::error::Result;

/// Port: whole-document persistence for the ledger.
///
/// `save` replaces the stored document entirely; there is no partial or
/// incremental write.
pub trait LedgerStore: Send {
    /// Load the stored document. `None` when nothing (or an empty
    /// document) has been stored yet.
    fn load(&self) -> Result<Option<LedgerDocument>>;

    /// Replace the stored document
    fn save(&mut self, document: &LedgerDocument) -> Result<()>;

    /// Human-readable location, used in logs
    fn location(&self) -> String;
}
