//! Read-only views over a chain file.
//!
//! Mining never calls into this module; it backs the `supply` report and
//! lets the runtime resume the height counter from an existing file.
//! The report is strict about malformed lines, the resume scan is not.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::domain::Block;
use crate::error::{MinerError, Result};

/// Aggregate view of a chain file
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChainSummary {
    /// Number of block records
    pub blocks: u64,
    /// Highest recorded height (0 for an empty chain)
    pub tip_height: u64,
    /// Sum of all rewards (mirror BTC issued)
    pub total_reward: f64,
    /// Sum of all search times, seconds
    pub total_mining_time: f64,
}

impl ChainSummary {
    /// Summarize a list of blocks
    pub fn from_blocks(blocks: &[Block]) -> Self {
        blocks.iter().fold(Self::default(), |mut acc, block| {
            acc.blocks += 1;
            acc.tip_height = acc.tip_height.max(block.height);
            acc.total_reward += block.reward;
            acc.total_mining_time += block.mining_time;
            acc
        })
    }
}

fn open_chain(path: &Path) -> Result<Option<BufReader<File>>> {
    match File::open(path) {
        Ok(file) => Ok(Some(BufReader::new(file))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(MinerError::ChainIo {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read every block from a chain file. A missing file is an empty chain.
pub fn read_chain(path: &Path) -> Result<Vec<Block>> {
    let Some(reader) = open_chain(path)? else {
        return Ok(Vec::new());
    };

    let mut blocks = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| MinerError::ChainIo {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let block = serde_json::from_str(&line).map_err(|e| MinerError::CorruptRecord {
            path: path.to_path_buf(),
            line: index + 1,
            reason: e.to_string(),
        })?;
        blocks.push(block);
    }
    Ok(blocks)
}

/// Highest height recorded in a chain file (0 if empty or missing).
///
/// Only the `height` field of each record is read. Lines that are not JSON
/// or carry no integer height are logged and skipped.
pub fn last_height(path: &Path) -> Result<u64> {
    let Some(reader) = open_chain(path)? else {
        return Ok(0);
    };

    let mut tip = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| MinerError::ChainIo {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let height = serde_json::from_str::<serde_json::Value>(&line)
            .ok()
            .and_then(|record| record.get("height").and_then(serde_json::Value::as_u64));
        match height {
            Some(height) => tip = tip.max(height),
            None => warn!(
                "[sm-01] Skipping unreadable chain line {} in {}",
                index + 1,
                path.display()
            ),
        }
    }
    Ok(tip)
}

/// Summarize a chain file
pub fn summarize(path: &Path) -> Result<ChainSummary> {
    Ok(ChainSummary::from_blocks(&read_chain(path)?))
}
