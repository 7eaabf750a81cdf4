//! Idea input/output records

use serde::{Deserialize, Serialize};

/// State tag stamped on every analysis output
pub const ANALYZED_STATE: &str = "|analyzed⟩";

/// One line of the ideas file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdeaEntry {
    /// Ledger id of the submitting agent
    pub agent_id: String,
    /// Display name of the submitting agent
    pub agent_name: String,
    /// Idea text
    pub idea: String,
    /// Mirror BTC granted for the idea
    pub grant_btc_mirror: f64,
}

/// One line of the outputs file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdeaOutput {
    /// UNIX seconds at processing time
    pub timestamp: i64,
    /// Copied from the idea
    pub agent_id: String,
    /// Copied from the idea
    pub agent_name: String,
    /// Copied from the idea
    pub original_idea: String,
    /// Generated analysis text
    pub quantum_analysis: String,
    /// Always [`ANALYZED_STATE`]
    pub quantum_state: String,
    /// Simulated decoherence in `[0, 0.3)`
    pub decoherence_factor: f64,
}

/// Summary of one pass over the ideas file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Ideas analyzed and written
    pub processed: u64,
    /// Non-blank lines that were not valid ideas
    pub skipped: u64,
}
