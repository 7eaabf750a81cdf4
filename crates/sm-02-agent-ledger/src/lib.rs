//! # Satoshi Mirror - Agent Ledger (Subsystem 02)
//!
//! **Bounded Context:** Agent bookkeeping
//!
//! ## Purpose
//!
//! Maintains a single JSON document holding a fixed domain catalog, a
//! write-once agent-generator template and the mutable list of agents.
//! Supports two mutations, `add_agent` (create or full overwrite) and
//! `grant_btc` (balance credit), each persisting the whole document.
//!
//! ## Critical Invariants
//!
//! 1. **Unique ids**: at most one agent per id
//! 2. **Whole-document persistence**: every successful mutation rewrites
//!    the document before returning; nothing is written on failure
//! 3. **Balance isolation**: `add_agent` never changes a balance
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use sm_02_agent_ledger::{AgentProfile, Ledger};
//!
//! let mut ledger = Ledger::open_file("agents_ledger.json")?;
//! ledger.add_agent("bot_rami", AgentProfile::new("Rami Quantum"))?;
//! ledger.grant_btc("bot_rami", 21.0)?;
//! # Ok::<(), sm_02_agent_ledger::LedgerError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Ledger store adapters
pub mod adapters;
/// Ledger document model and seed data
pub mod domain;
pub mod ports;
pub mod service;

mod error;

pub use adapters::{JsonFileLedgerStore, MemoryLedgerStore};
pub use domain::{
    Agent, AgentGenerator, AgentMeta, AgentProfile, LedgerDocument, UpsertOutcome,
    DEFAULT_DOMAIN_LEVEL, DEFAULT_EXPERTISE,
};
pub use error::{LedgerError, Result};
pub use ports::LedgerStore;
pub use service::Ledger;

/// Subsystem identifier used in log prefixes
pub const SUBSYSTEM_ID: u8 = 2;

/// Default ledger file name
pub const LEDGER_FILE: &str = "agents_ledger.json";
