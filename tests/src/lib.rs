//! # Satoshi Mirror Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-subsystem flows over real files
//!     ├── chain_flow.rs
//!     ├── ledger_flow.rs
//!     └── runtime_flow.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sm-tests
//! cargo test -p sm-tests integration::ledger_flow
//! ```

#![allow(dead_code)]

pub mod integration;
