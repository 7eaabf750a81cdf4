use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::LedgerDocument;
use crate::error::{LedgerError, Result};
use crate::ports::LedgerStore;

/// In-memory ledger store for tests.
///
/// Clones share state, so a test can keep one clone to inspect saves after
/// handing the other to a [`crate::Ledger`]. Saves can be forced to fail.
#[derive(Clone, Default)]
pub struct MemoryLedgerStore {
    document: Arc<Mutex<Option<LedgerDocument>>>,
    saves: Arc<AtomicUsize>,
    fail_saves: Arc<AtomicBool>,
}

impl MemoryLedgerStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with `document`
    pub fn with_document(document: LedgerDocument) -> Self {
        let store = Self::default();
        *store.document.lock() = Some(document);
        store
    }

    /// Last saved (or pre-loaded) document
    pub fn stored(&self) -> Option<LedgerDocument> {
        self.document.lock().clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make every subsequent save fail (or succeed again)
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load(&self) -> Result<Option<LedgerDocument>> {
        Ok(self.document.lock().clone())
    }

    fn save(&mut self, document: &LedgerDocument) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(LedgerError::Io {
                path: "memory".into(),
                source: std::io::Error::other("injected save failure"),
            });
        }
        *self.document.lock() = Some(document.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
