//! # Satoshi Mirror - AI Cycle (Subsystem 03)
//!
//! **Bounded Context:** Idea analysis
//!
//! Reads agent ideas from a JSON-lines file and appends one simulated
//! analysis record per idea to an outputs file. Lines that do not parse as
//! an idea are skipped and counted, never fatal.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
mod entities;
mod error;
pub mod service;

pub use entities::{CycleReport, IdeaEntry, IdeaOutput, ANALYZED_STATE};
pub use error::{AiCycleError, Result};
pub use service::AiCycle;

/// Subsystem identifier used in log prefixes
pub const SUBSYSTEM_ID: u8 = 3;

/// Default ideas file name
pub const IDEAS_FILE: &str = "agents_ideas.jsonl";

/// Default outputs file name
pub const OUTPUTS_FILE: &str = "agents_outputs.jsonl";
