//! # Mirror Configuration
//!
//! Layered configuration: built-in defaults, then a JSON file, then
//! environment overrides, then command-line flags (applied by the caller).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use sm_01_mirror_miner::MinerConfig;

use crate::error::{Result, RuntimeError};

/// Config file looked up inside the data directory
pub const CONFIG_FILE: &str = "mirror_config.json";

/// Complete runtime configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MirrorConfig {
    /// Data file locations.
    pub storage: StorageConfig,
    /// Mining parameters.
    pub mining: MinerConfig,
    /// Standalone energy monitor.
    pub energy: EnergyConfig,
    /// Joint `quantum_synthesis` run.
    pub synthesis: SynthesisConfig,
}

/// Data file locations. File names are relative to `data_dir`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding every data file.
    pub data_dir: PathBuf,
    /// Append-only block log.
    pub chain_file: String,
    /// Agent ledger document.
    pub ledger_file: String,
    /// Idea input.
    pub ideas_file: String,
    /// Idea analysis output.
    pub outputs_file: String,
    /// Energy readings log.
    pub energy_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            chain_file: "mirror_chain.jsonl".to_string(),
            ledger_file: sm_02_agent_ledger::LEDGER_FILE.to_string(),
            ideas_file: sm_03_ai_cycle::IDEAS_FILE.to_string(),
            outputs_file: sm_03_ai_cycle::OUTPUTS_FILE.to_string(),
            energy_file: sm_04_energy_sensor::READINGS_FILE.to_string(),
        }
    }
}

impl StorageConfig {
    /// Chain file path.
    pub fn chain_path(&self) -> PathBuf {
        self.data_dir.join(&self.chain_file)
    }

    /// Ledger file path.
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(&self.ledger_file)
    }

    /// Idea input path.
    pub fn ideas_path(&self) -> PathBuf {
        self.data_dir.join(&self.ideas_file)
    }

    /// Idea output path.
    pub fn outputs_path(&self) -> PathBuf {
        self.data_dir.join(&self.outputs_file)
    }

    /// Energy log path.
    pub fn energy_path(&self) -> PathBuf {
        self.data_dir.join(&self.energy_file)
    }
}

/// Standalone energy monitor.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EnergyConfig {
    /// Seconds between readings (default: 5).
    pub interval_secs: u64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self { interval_secs: 5 }
    }
}

impl EnergyConfig {
    /// Reading interval.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Joint mining + ideas + energy run.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Blocks mined by the mining worker (default: 3).
    pub blocks: u64,
    /// Seconds between energy readings (default: 3).
    pub energy_interval_secs: u64,
    /// Readings taken before the energy worker stops (default: 3).
    pub energy_readings: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            blocks: 3,
            energy_interval_secs: 3,
            energy_readings: 3,
        }
    }
}

impl SynthesisConfig {
    /// Energy reading interval.
    pub fn energy_interval(&self) -> Duration {
        Duration::from_secs(self.energy_interval_secs)
    }
}

impl MirrorConfig {
    /// Load configuration from the process environment.
    ///
    /// `explicit` must exist when given. Otherwise `<data_dir>/mirror_config.json`
    /// is read if present, where `data_dir` is `data_dir_hint`, else
    /// `SM_DATA_DIR`, else the current directory.
    pub fn load(explicit: Option<&Path>, data_dir_hint: Option<&Path>) -> Result<Self> {
        Self::load_with(explicit, data_dir_hint, |key| std::env::var(key).ok())
    }

    /// [`MirrorConfig::load`] with an arbitrary environment source.
    pub fn load_with<F>(explicit: Option<&Path>, data_dir_hint: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let dir = data_dir_hint
                    .map(Path::to_path_buf)
                    .or_else(|| env("SM_DATA_DIR").map(PathBuf::from))
                    .unwrap_or_else(|| StorageConfig::default().data_dir);
                let candidate = dir.join(CONFIG_FILE);
                if candidate.is_file() {
                    Self::from_file(&candidate)?
                } else {
                    debug!("No config file at {}, using defaults", candidate.display());
                    Self::default()
                }
            }
        };

        config.apply_env(env)?;
        if let Some(dir) = data_dir_hint {
            config.storage.data_dir = dir.to_path_buf();
        }
        Ok(config)
    }

    /// Parse a JSON config file. Missing sections keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| RuntimeError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|e| RuntimeError::Config {
            origin: path.display().to_string(),
            reason: e.to_string(),
        })?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn apply_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = env("SM_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(value) = env("SM_DIFFICULTY") {
            self.mining.difficulty = parse_var("SM_DIFFICULTY", &value)?;
        }
        if let Some(value) = env("SM_BLOCK_INTERVAL_MS") {
            self.mining.block_interval_ms = parse_var("SM_BLOCK_INTERVAL_MS", &value)?;
        }
        Ok(())
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| RuntimeError::Config {
        origin: name.to_string(),
        reason: format!("{value:?}: {e}"),
    })
}
