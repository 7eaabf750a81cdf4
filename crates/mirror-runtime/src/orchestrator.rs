//! # Orchestrator
//!
//! Maps an [`Operation`] onto the subsystems. Blocking work (mining,
//! ledger I/O, the idea pass) runs on tokio's blocking pool; the energy
//! monitor is an async task. Every component is created per operation and
//! owned by exactly one task. The only value shared between tasks is the
//! `watch` shutdown receiver.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use mirror_telemetry::{log_agent_event, log_block_event, log_event};
use sm_01_mirror_miner::{last_height, summarize, Block, JsonlChainStore, Miner};
use sm_02_agent_ledger::{AgentProfile, Ledger};
use sm_03_ai_cycle::{AiCycle, CycleReport};
use sm_04_energy_sensor::EnergySensor;

use crate::config::MirrorConfig;
use crate::error::{Result, RuntimeError};
use crate::reports::{data_file_status, OperationReport};

/// One unit of work requested from the command line
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    /// Create or overwrite an agent
    AddAgent {
        /// Agent id
        id: String,
        /// Display name
        name: String,
        /// Free-text description
        description: String,
    },
    /// Credit mirror BTC to an agent
    Grant {
        /// Agent id
        id: String,
        /// Amount to credit
        amount: f64,
    },
    /// Mine `blocks` blocks (1 = single block at the configured difficulty)
    Mine {
        /// Block count
        blocks: u64,
    },
    /// One idea-processing pass
    AiCycle,
    /// Energy monitor until shutdown
    Energy {
        /// Time between readings
        interval: Duration,
    },
    /// Mining, ideas and energy side by side
    QuantumSynthesis,
    /// Chain supply report
    Supply,
    /// Data file report
    Status,
}

impl Operation {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Operation::AddAgent { .. } => "add_agent",
            Operation::Grant { .. } => "grant",
            Operation::Mine { .. } => "mine",
            Operation::AiCycle => "ai_cycle",
            Operation::Energy { .. } => "energy",
            Operation::QuantumSynthesis => "quantum_synthesis",
            Operation::Supply => "supply",
            Operation::Status => "status",
        }
    }
}

/// Drives one operation at a time against the configured data files
pub struct Orchestrator {
    config: MirrorConfig,
    shutdown: watch::Receiver<bool>,
}

impl Orchestrator {
    /// Create an orchestrator. Long-running operations stop once
    /// `shutdown` becomes `true`.
    pub fn new(config: MirrorConfig, shutdown: watch::Receiver<bool>) -> Self {
        Self { config, shutdown }
    }

    /// Active configuration
    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    /// Run `operation` to completion (or until shutdown)
    pub async fn run(&self, operation: Operation) -> Result<OperationReport> {
        info!("Running operation: {}", operation.name());
        match operation {
            Operation::AddAgent {
                id,
                name,
                description,
            } => self.add_agent(id, name, description).await,
            Operation::Grant { id, amount } => self.grant(id, amount).await,
            Operation::Mine { blocks } => {
                let blocks = self.mine(blocks).await?;
                Ok(OperationReport::Mined { blocks })
            }
            Operation::AiCycle => Ok(OperationReport::Cycle(self.ai_cycle().await?)),
            Operation::Energy { interval } => {
                let readings = self.energy(interval, None).await?;
                Ok(OperationReport::Energy { readings })
            }
            Operation::QuantumSynthesis => self.quantum_synthesis().await,
            Operation::Supply => {
                let path = self.config.storage.chain_path();
                let summary = blocking("supply", move || Ok(summarize(&path)?)).await?;
                Ok(OperationReport::Supply(summary))
            }
            Operation::Status => {
                let storage = self.config.storage.clone();
                let files = blocking("status", move || Ok(data_file_status(&storage))).await?;
                Ok(OperationReport::Status(files))
            }
        }
    }

    async fn add_agent(
        &self,
        id: String,
        name: String,
        description: String,
    ) -> Result<OperationReport> {
        let path = self.config.storage.ledger_path();
        blocking("ledger", move || {
            let mut ledger = Ledger::open_file(&path)?;
            let profile = AgentProfile::new(name)
                .with_description(description)
                .with_meta_entry("quantum_origin", true);
            let outcome = ledger.add_agent(&id, profile)?;
            log_agent_event!(info, "sm-02", "Agent upserted", id, outcome = ?outcome);
            Ok(OperationReport::AgentUpserted { id, outcome })
        })
        .await
    }

    async fn grant(&self, id: String, amount: f64) -> Result<OperationReport> {
        let path = self.config.storage.ledger_path();
        blocking("ledger", move || {
            let mut ledger = Ledger::open_file(&path)?;
            let found = ledger.grant_btc(&id, amount)?;
            if found {
                log_agent_event!(info, "sm-02", "Mirror BTC granted", id, amount = amount);
            } else {
                log_agent_event!(warn, "sm-02", "Grant to unknown agent", id);
            }
            Ok(OperationReport::Granted { id, amount, found })
        })
        .await
    }

    async fn mine(&self, count: u64) -> Result<Vec<Block>> {
        let config = self.config.clone();
        let shutdown = self.shutdown.clone();
        blocking("mining", move || mine_blocks(&config, count, &shutdown)).await
    }

    async fn ai_cycle(&self) -> Result<CycleReport> {
        let cycle = self.ai_cycle_worker();
        blocking("ai_cycle", move || Ok(cycle.process_ideas()?)).await
    }

    async fn energy(&self, interval: Duration, max_readings: Option<u64>) -> Result<u64> {
        let sensor = EnergySensor::new(self.config.storage.energy_path());
        Ok(sensor
            .monitor(interval, max_readings, self.shutdown.clone())
            .await?)
    }

    /// Mining, the idea pass and a bounded energy monitor as three
    /// independent tasks. Waits for all three; the first failure (in
    /// mining, ideas, energy order) is returned after the others finish.
    async fn quantum_synthesis(&self) -> Result<OperationReport> {
        let synthesis = self.config.synthesis.clone();
        log_event!(
            info,
            "runtime",
            "Starting quantum synthesis",
            blocks = synthesis.blocks,
            energy_readings = synthesis.energy_readings
        );

        let mining: JoinHandle<Result<Vec<Block>>> = {
            let config = self.config.clone();
            let shutdown = self.shutdown.clone();
            let count = synthesis.blocks;
            tokio::task::spawn_blocking(move || mine_blocks(&config, count, &shutdown))
        };

        let ideas: JoinHandle<Result<CycleReport>> = {
            let cycle = self.ai_cycle_worker();
            tokio::task::spawn_blocking(move || Ok(cycle.process_ideas()?))
        };

        let energy: JoinHandle<Result<u64>> = {
            let sensor = EnergySensor::new(self.config.storage.energy_path());
            let shutdown = self.shutdown.clone();
            let interval = synthesis.energy_interval();
            let max = synthesis.energy_readings;
            tokio::spawn(async move { Ok(sensor.monitor(interval, Some(max), shutdown).await?) })
        };

        let (mining, ideas, energy) = tokio::join!(mining, ideas, energy);
        let blocks = joined("mining", mining)?;
        let cycle = joined("ai_cycle", ideas)?;
        let readings = joined("energy", energy)?;

        info!(
            "Quantum synthesis complete: {} blocks, {} ideas, {} readings",
            blocks.len(),
            cycle.processed,
            readings
        );
        Ok(OperationReport::Synthesis {
            blocks,
            cycle,
            readings,
        })
    }

    fn ai_cycle_worker(&self) -> AiCycle {
        AiCycle::new(
            self.config.storage.ideas_path(),
            self.config.storage.outputs_path(),
        )
    }
}

/// Open the chain, resume after its tip and mine `count` blocks.
///
/// A single block uses [`Miner::mine_block`] and ignores shutdown; larger
/// counts go through continuous mining and stop early on shutdown.
fn mine_blocks(
    config: &MirrorConfig,
    count: u64,
    shutdown: &watch::Receiver<bool>,
) -> Result<Vec<Block>> {
    let path = config.storage.chain_path();
    let tip = last_height(&path)?;
    let mut miner = Miner::resume_from(
        config.mining.clone(),
        Box::new(JsonlChainStore::new(&path)),
        tip,
    );

    let blocks = match count {
        0 => Vec::new(),
        1 => vec![miner.mine_block(config.mining.difficulty)?],
        _ => miner.continuous_mining(count, shutdown)?,
    };

    for block in &blocks {
        log_block_event!(
            debug,
            "sm-01",
            "Block appended",
            block.height,
            block.hash,
            nonce = block.nonce
        );
    }
    if (blocks.len() as u64) < count {
        warn!("Mining stopped early: {}/{} blocks", blocks.len(), count);
    }
    Ok(blocks)
}

async fn blocking<T, F>(worker: &'static str, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    joined(worker, tokio::task::spawn_blocking(f).await)
}

fn joined<T>(
    worker: &'static str,
    result: std::result::Result<Result<T>, tokio::task::JoinError>,
) -> Result<T> {
    result.map_err(|source| RuntimeError::Worker { worker, source })?
}
