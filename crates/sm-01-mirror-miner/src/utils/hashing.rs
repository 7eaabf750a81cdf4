//! Hashing utilities for the mirror miner
//!
//! Every digest in the mirror chain is a plain SHA-256 over the decimal
//! text of the block fields, rendered as lowercase hex. Difficulty is
//! counted in leading `'0'` hex characters, not bits.

use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of data
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute SHA-256 and render it as lowercase hex (64 chars)
#[inline]
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Mining payload prefix: `"{height}{timestamp}"`.
///
/// The nonce is appended in decimal for every attempt.
pub fn mining_prefix(height: u64, timestamp: i64) -> String {
    format!("{height}{timestamp}")
}

/// Hash a single attempt: `sha256(prefix || nonce)`
#[cfg(test)]
pub(crate) fn attempt_hash(prefix: &str, nonce: u64) -> String {
    let mut payload = String::with_capacity(prefix.len() + 20);
    payload.push_str(prefix);
    payload.push_str(&nonce.to_string());
    sha256_hex(payload.as_bytes())
}

/// Number of leading `'0'` characters in a hex digest
#[inline]
pub fn leading_zero_chars(hash_hex: &str) -> usize {
    hash_hex.bytes().take_while(|b| *b == b'0').count()
}

/// Check if a hex digest meets the difficulty predicate
#[inline]
pub fn meets_difficulty(hash_hex: &str, difficulty: u32) -> bool {
    leading_zero_chars(hash_hex) >= difficulty as usize
}

/// Derive the cosmetic miner address recorded in every block.
///
/// `quantum_miner_<n>` where `n` is the first 8 bytes (big-endian) of
/// `sha256` over the first 16 hex characters of the block hash.
pub fn miner_address(block_hash: &str) -> String {
    let head = &block_hash[..block_hash.len().min(16)];
    let digest = sha256(head.as_bytes());
    let mut word = [0u8; 8];
    word.copy_from_slice(&digest[..8]);
    format!("quantum_miner_{}", u64::from_be_bytes(word))
}
