//! # Satoshi Mirror Runtime
//!
//! Wires the subsystems together behind the `satoshi-mirror` binary.
//!
//! ## Subsystems
//!
//! | ID | Crate | Purpose |
//! |----|-------|---------|
//! | 01 | `sm-01-mirror-miner` | PoW search, append-only chain file |
//! | 02 | `sm-02-agent-ledger` | Agent document, grants |
//! | 03 | `sm-03-ai-cycle` | Idea analysis pass |
//! | 04 | `sm-04-energy-sensor` | Simulated readings loop |
//!
//! ## Modes
//!
//! Single operations run to completion. `quantum_synthesis` runs mining,
//! the idea pass and a bounded energy monitor concurrently, each on its own
//! task, and waits for all three. Ctrl-C flips the shared shutdown signal.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod orchestrator;
pub mod reports;

mod error;

pub use cli::{Cli, Command};
pub use config::{EnergyConfig, MirrorConfig, StorageConfig, SynthesisConfig, CONFIG_FILE};
pub use error::{Result, RuntimeError};
pub use orchestrator::{Operation, Orchestrator};
pub use reports::{data_file_status, FileStatus, OperationReport};
