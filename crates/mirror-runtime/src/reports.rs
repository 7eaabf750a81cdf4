//! Human-readable reports printed by the binary.

use std::fmt;
use std::path::PathBuf;

use sm_01_mirror_miner::{Block, ChainSummary};
use sm_02_agent_ledger::UpsertOutcome;
use sm_03_ai_cycle::CycleReport;

use crate::config::StorageConfig;

/// Existence and size of one data file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileStatus {
    /// Short label ("chain", "ledger", ...)
    pub label: &'static str,
    /// Resolved path
    pub path: PathBuf,
    /// Size in bytes, `None` when the file is missing
    pub size: Option<u64>,
}

/// Inspect every data file named by `storage`
pub fn data_file_status(storage: &StorageConfig) -> Vec<FileStatus> {
    [
        ("chain", storage.chain_path()),
        ("ledger", storage.ledger_path()),
        ("ideas", storage.ideas_path()),
        ("outputs", storage.outputs_path()),
        ("energy", storage.energy_path()),
    ]
    .into_iter()
    .map(|(label, path)| {
        let size = std::fs::metadata(&path)
            .ok()
            .filter(|m| m.is_file())
            .map(|m| m.len());
        FileStatus { label, path, size }
    })
    .collect()
}

/// Result of one operation
#[derive(Clone, Debug, PartialEq)]
pub enum OperationReport {
    /// Agent created or overwritten
    AgentUpserted {
        /// Agent id
        id: String,
        /// Whether the id was new
        outcome: UpsertOutcome,
    },
    /// Grant attempted
    Granted {
        /// Agent id
        id: String,
        /// Amount credited
        amount: f64,
        /// False when no agent has this id
        found: bool,
    },
    /// Blocks sealed (fewer than requested if interrupted)
    Mined {
        /// Sealed blocks, in height order
        blocks: Vec<Block>,
    },
    /// One idea pass
    Cycle(CycleReport),
    /// Energy monitor finished
    Energy {
        /// Readings recorded
        readings: u64,
    },
    /// Joint run finished
    Synthesis {
        /// Blocks sealed by the mining worker
        blocks: Vec<Block>,
        /// Idea worker summary
        cycle: CycleReport,
        /// Readings recorded by the energy worker
        readings: u64,
    },
    /// Chain supply
    Supply(ChainSummary),
    /// Data files
    Status(Vec<FileStatus>),
}

impl OperationReport {
    /// Whether the operation did what was asked.
    ///
    /// Only a grant to an unknown agent counts as unsuccessful.
    pub fn is_success(&self) -> bool {
        !matches!(self, OperationReport::Granted { found: false, .. })
    }
}

impl fmt::Display for OperationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationReport::AgentUpserted { id, outcome } => match outcome {
                UpsertOutcome::Created => write!(f, "✅ Agent {id} created"),
                UpsertOutcome::Updated => write!(f, "✅ Agent {id} updated"),
            },
            OperationReport::Granted {
                id,
                amount,
                found: true,
            } => write!(f, "💰 Granted {amount} mirror BTC to {id}"),
            OperationReport::Granted { id, found: false, .. } => {
                write!(f, "❌ Agent {id} not found")
            }
            OperationReport::Mined { blocks } => {
                write!(f, "⛏️  Mined {} block(s)", blocks.len())?;
                for block in blocks {
                    write!(
                        f,
                        "\n  #{} {} nonce={} time={:.3}s",
                        block.height, block.hash, block.nonce, block.mining_time
                    )?;
                }
                Ok(())
            }
            OperationReport::Cycle(report) => write_cycle(f, report),
            OperationReport::Energy { readings } => {
                write!(f, "⚡ Recorded {readings} energy reading(s)")
            }
            OperationReport::Synthesis {
                blocks,
                cycle,
                readings,
            } => {
                writeln!(f, "🌌 Quantum synthesis complete")?;
                writeln!(f, "  blocks mined:     {}", blocks.len())?;
                write!(f, "  ")?;
                write_cycle(f, cycle)?;
                write!(f, "\n  energy readings:  {readings}")
            }
            OperationReport::Supply(summary) => {
                writeln!(f, "📊 Mirror chain supply")?;
                writeln!(f, "  blocks:           {}", summary.blocks)?;
                writeln!(f, "  tip height:       {}", summary.tip_height)?;
                writeln!(f, "  mirror BTC issued: {}", summary.total_reward)?;
                write!(f, "  mining time:      {:.3}s", summary.total_mining_time)
            }
            OperationReport::Status(files) => {
                write!(f, "📁 Data files")?;
                for file in files {
                    match file.size {
                        Some(size) => write!(
                            f,
                            "\n  {:<8} {} ({} bytes)",
                            file.label,
                            file.path.display(),
                            size
                        )?,
                        None => write!(
                            f,
                            "\n  {:<8} {} (missing)",
                            file.label,
                            file.path.display()
                        )?,
                    }
                }
                Ok(())
            }
        }
    }
}

fn write_cycle(f: &mut fmt::Formatter<'_>, report: &CycleReport) -> fmt::Result {
    write!(
        f,
        "🧠 Ideas processed: {} (skipped {})",
        report.processed, report.skipped
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_status_reports_missing_and_present() {
        let dir = TempDir::new().unwrap();
        let storage = StorageConfig {
            data_dir: dir.path().to_path_buf(),
            ..StorageConfig::default()
        };
        std::fs::write(storage.chain_path(), b"{}\n").unwrap();

        let files = data_file_status(&storage);

        assert_eq!(files.len(), 5);
        assert_eq!(files[0].label, "chain");
        assert_eq!(files[0].size, Some(3));
        assert!(files[1..].iter().all(|f| f.size.is_none()));
    }

    #[test]
    fn test_missing_grant_is_not_success() {
        let report = OperationReport::Granted {
            id: "ghost".into(),
            amount: 1.0,
            found: false,
        };
        assert!(!report.is_success());
        assert_eq!(report.to_string(), "❌ Agent ghost not found");
    }

    #[test]
    fn test_supply_display() {
        let report = OperationReport::Supply(ChainSummary {
            blocks: 2,
            tip_height: 2,
            total_reward: 100.0,
            total_mining_time: 0.5,
        });
        let text = report.to_string();
        assert!(text.contains("blocks:           2"));
        assert!(text.contains("mirror BTC issued: 100"));
    }
}
