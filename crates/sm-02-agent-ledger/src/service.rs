//! Agent ledger service
//!
//! The ledger owns the in-memory [`LedgerDocument`] and writes it back
//! through its [`LedgerStore`] after every mutation. Mutations are applied
//! to a copy, saved, and only then committed, so a failed save leaves both
//! the in-memory and the stored document untouched.
//!
//! The ledger is single-writer: it is `Send` but not shared, and the file
//! store's lock rejects a second process.

use std::path::Path;

use tracing::{info, warn};

use crate::adapters::JsonFileLedgerStore;
use crate::domain::{default_document, Agent, AgentProfile, LedgerDocument, UpsertOutcome};
use crate::error::{LedgerError, Result};
use crate::ports::LedgerStore;

/// The agent ledger
pub struct Ledger {
    document: LedgerDocument,
    store: Box<dyn LedgerStore>,
}

impl Ledger {
    /// Load the ledger from `store`, creating and persisting the default
    /// document if nothing is stored yet.
    pub fn open(mut store: Box<dyn LedgerStore>) -> Result<Self> {
        let document = match store.load()? {
            Some(document) => {
                info!(
                    "[sm-02] Ledger loaded from {}: {} agents",
                    store.location(),
                    document.agents.len()
                );
                let duplicates = document.duplicate_ids();
                if !duplicates.is_empty() {
                    warn!(
                        "[sm-02] Ledger has duplicate agent ids {:?}; the first entry wins",
                        duplicates
                    );
                }
                document
            }
            None => {
                let document = default_document();
                store.save(&document)?;
                info!(
                    "[sm-02] Ledger initialized with defaults at {}: {} seed agents",
                    store.location(),
                    document.agents.len()
                );
                document
            }
        };

        Ok(Self { document, store })
    }

    /// Open a file-backed ledger at `path`
    pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(Box::new(JsonFileLedgerStore::open(path)?))
    }

    /// Create or update an agent.
    ///
    /// An existing `id` has every mutable field overwritten except its
    /// balance and unlock flag. A new `id` starts with a zero balance and
    /// AI unlocked. Both paths succeed; only persistence can fail.
    pub fn add_agent(&mut self, id: &str, profile: AgentProfile) -> Result<UpsertOutcome> {
        let mut next = self.document.clone();

        let outcome = match next.position(id) {
            Some(index) => {
                profile.apply_to(&mut next.agents[index]);
                UpsertOutcome::Updated
            }
            None => {
                next.agents.push(profile.into_new_agent(id));
                UpsertOutcome::Created
            }
        };

        self.commit(next)?;
        match outcome {
            UpsertOutcome::Updated => info!("[sm-02] Agent {} already exists. Updated.", id),
            UpsertOutcome::Created => info!("[sm-02] Agent {} created in the ledger.", id),
        }
        Ok(outcome)
    }

    /// Credit `amount` mirror BTC to an agent and unlock its AI.
    ///
    /// Returns `Ok(false)` for an unknown id without touching anything.
    /// Negative or non-finite amounts are rejected.
    pub fn grant_btc(&mut self, id: &str, amount: f64) -> Result<bool> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(LedgerError::InvalidAmount { amount });
        }

        let Some(index) = self.document.position(id) else {
            warn!("[sm-02] Grant to unknown agent {}", id);
            return Ok(false);
        };

        let mut next = self.document.clone();
        let agent = &mut next.agents[index];
        agent.balance_btc_mirror += amount;
        agent.ai_unlocked = true;
        let balance = agent.balance_btc_mirror;

        self.commit(next)?;
        info!(
            "[sm-02] Granted {} mirror BTC to {} (balance {})",
            amount, id, balance
        );
        Ok(true)
    }

    /// Agent by id
    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.document.position(id).map(|i| &self.document.agents[i])
    }

    /// All agents in document order
    pub fn agents(&self) -> &[Agent] {
        &self.document.agents
    }

    /// The fixed domain catalog
    pub fn domain_catalog(&self) -> &[String] {
        &self.document.domain_catalog
    }

    /// The whole document
    pub fn document(&self) -> &LedgerDocument {
        &self.document
    }

    fn commit(&mut self, next: LedgerDocument) -> Result<()> {
        self.store.save(&next)?;
        self.document = next;
        Ok(())
    }
}
