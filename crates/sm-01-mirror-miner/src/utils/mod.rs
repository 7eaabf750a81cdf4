//! Utility modules for the mirror miner

pub mod hashing;

pub use hashing::{
    leading_zero_chars, meets_difficulty, miner_address, mining_prefix, sha256, sha256_hex,
};
