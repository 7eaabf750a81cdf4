//! Command-line surface of the `satoshi-mirror` binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::MirrorConfig;
use crate::orchestrator::Operation;

/// Satoshi Mirror: toy PoW chain, agent ledger and simulated AI/energy workers
#[derive(Parser, Debug)]
#[command(name = "satoshi-mirror")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON config file (default: <data-dir>/mirror_config.json when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the chain, ledger and log files
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Mode to run
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Operating modes
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create or overwrite an agent in the ledger
    #[command(name = "add_agent")]
    AddAgent {
        /// Agent id
        id: String,
        /// Display name
        name: String,
        /// Free-text description
        description: Option<String>,
    },

    /// Mine one or more blocks
    Mine {
        /// Number of blocks (default: 1)
        blocks: Option<u64>,
    },

    /// Run one idea-processing pass
    #[command(name = "ai_cycle")]
    AiCycle,

    /// Take energy readings until interrupted
    Energy {
        /// Seconds between readings (default from config)
        interval: Option<u64>,
    },

    /// Mine, process ideas and read energy concurrently
    #[command(name = "quantum_synthesis")]
    QuantumSynthesis,

    /// Credit mirror BTC to an agent
    Grant {
        /// Agent id
        id: String,
        /// Amount to credit
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// Report blocks and mirror BTC issued so far
    Supply,

    /// Report which data files exist and their sizes
    Status,
}

impl Command {
    /// Resolve CLI defaults against the loaded config
    pub fn into_operation(self, config: &MirrorConfig) -> Operation {
        match self {
            Command::AddAgent {
                id,
                name,
                description,
            } => Operation::AddAgent {
                id,
                name,
                description: description.unwrap_or_default(),
            },
            Command::Mine { blocks } => Operation::Mine {
                blocks: blocks.unwrap_or(1),
            },
            Command::AiCycle => Operation::AiCycle,
            Command::Energy { interval } => Operation::Energy {
                interval: interval
                    .map(Duration::from_secs)
                    .unwrap_or_else(|| config.energy.interval()),
            },
            Command::QuantumSynthesis => Operation::QuantumSynthesis,
            Command::Grant { id, amount } => Operation::Grant { id, amount },
            Command::Supply => Operation::Supply,
            Command::Status => Operation::Status,
        }
    }
}
