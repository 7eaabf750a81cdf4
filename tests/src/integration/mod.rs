//! Cross-subsystem flows.

pub mod chain_flow;
pub mod ledger_flow;
pub mod runtime_flow;
