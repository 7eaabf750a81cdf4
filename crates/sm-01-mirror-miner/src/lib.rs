//! # Satoshi Mirror - Mirror Miner (Subsystem 01)
//!
//! **Bounded Context:** Proof-of-Work mining of the mirror chain
//!
//! ## Purpose
//!
//! Builds blocks, searches for a nonce whose SHA-256 digest starts with
//! `difficulty` `'0'` hex characters, seals the block and appends it to an
//! append-only chain file (one JSON object per line).
//!
//! ## Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Adapters (Outer)                                   │
//! │  - JsonlChainStore: append-only chain file          │
//! │  - MemoryChainStore: tests                          │
//! │  - reader: supply report, height resume             │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Ports                                              │
//! │  - ChainStore                                       │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (pure)                                      │
//! │  - Block, NonceSearch, search()                     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known limitations
//!
//! - The search is unbounded unless [`MinerConfig::max_attempts`] is set.
//! - `previous_hash` is a placeholder; blocks are not hash-linked.
//! - The height counter lives in the [`Miner`], not in the chain file.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Chain store adapters
pub mod adapters;
/// Domain entities and the nonce search
pub mod domain;
pub mod ports;
pub mod service;
pub mod utils;

mod config;
mod error;
mod metrics;

pub use config::MinerConfig;
pub use error::{MinerError, Result};
pub use metrics::MiningMetrics;

pub use adapters::storage::{
    last_height, read_chain, summarize, ChainSummary, JsonlChainStore, MemoryChainStore,
};
pub use domain::{
    Attempt, Block, MinerState, NonceSearch, SearchLimits, SearchOutcome,
    GENESIS_PREVIOUS_HASH, PLACEHOLDER_PREVIOUS_HASH,
};
pub use ports::ChainStore;
pub use service::Miner;

/// Subsystem identifier used in log prefixes
pub const SUBSYSTEM_ID: u8 = 1;

/// Mirror BTC recorded per block (never decremented from any supply)
pub const BLOCK_REWARD: f64 = 50.0;

/// Difficulty used by continuous mining
pub const DEFAULT_DIFFICULTY: u32 = 4;
