//! Domain layer - ledger document model and seed data
//!
//! ## Invariants
//!
//! 1. At most one agent per `id`
//! 2. `domain_catalog` and `agent_generator` never change after creation

mod entities;
pub mod seed;

pub use entities::*;
pub use seed::{default_document, domain_catalog, example_agents};
