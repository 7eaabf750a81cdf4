//! Domain layer - pure mining logic
//!
//! No I/O here: block sealing and the nonce search only. Persisting a
//! sealed block is the job of a [`crate::ports::ChainStore`].
//!
//! ## Invariants
//!
//! 1. A sealed block's hash has `difficulty` leading `'0'` characters
//! 2. Heights are contiguous from 1 within one chain file

mod entities;
pub mod search;

pub use entities::*;
pub use search::{search, NonceSearch, SearchLimits, SearchOutcome, CANCEL_CHECK_INTERVAL};
