//! Idea-processing pass

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, info, warn};

use crate::analysis::{decoherence_factor, quantum_ai_analysis};
use crate::entities::{CycleReport, IdeaEntry, IdeaOutput, ANALYZED_STATE};
use crate::error::{AiCycleError, Result};

/// Reads the ideas file and appends one analysis per valid idea
#[derive(Clone, Debug)]
pub struct AiCycle {
    ideas_path: PathBuf,
    outputs_path: PathBuf,
}

impl AiCycle {
    /// Create a cycle over the given input and output files
    pub fn new(ideas_path: impl Into<PathBuf>, outputs_path: impl Into<PathBuf>) -> Self {
        Self {
            ideas_path: ideas_path.into(),
            outputs_path: outputs_path.into(),
        }
    }

    /// Ideas file
    pub fn ideas_path(&self) -> &Path {
        &self.ideas_path
    }

    /// Outputs file
    pub fn outputs_path(&self) -> &Path {
        &self.outputs_path
    }

    /// Process every idea using the thread-local RNG
    pub fn process_ideas(&self) -> Result<CycleReport> {
        self.process_ideas_with(&mut rand::thread_rng())
    }

    /// Process every idea with an explicit random source.
    ///
    /// A missing ideas file is not an error: the pass reports zero ideas.
    /// The outputs file is only created once the first idea is written.
    pub fn process_ideas_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<CycleReport> {
        let input = match File::open(&self.ideas_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "[sm-03] No ideas file at {}, nothing to process",
                    self.ideas_path.display()
                );
                return Ok(CycleReport::default());
            }
            Err(source) => return Err(self.io_error(&self.ideas_path, source)),
        };

        let mut report = CycleReport::default();
        let mut output: Option<File> = None;

        for (index, line) in BufReader::new(input).lines().enumerate() {
            let line = line.map_err(|source| self.io_error(&self.ideas_path, source))?;
            if line.trim().is_empty() {
                continue;
            }

            let entry: IdeaEntry = match serde_json::from_str(&line) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("[sm-03] Skipping ideas line {}: {}", index + 1, e);
                    report.skipped += 1;
                    continue;
                }
            };

            let record = analyze(&entry, rng);
            let mut encoded = serde_json::to_vec(&record)?;
            encoded.push(b'\n');

            if output.is_none() {
                output = Some(self.open_outputs()?);
            }
            if let Some(file) = output.as_mut() {
                file.write_all(&encoded)
                    .map_err(|source| self.io_error(&self.outputs_path, source))?;
            }

            debug!("[sm-03] Analyzed idea from {}", entry.agent_id);
            report.processed += 1;
        }

        info!(
            "[sm-03] AI cycle complete: {} processed, {} skipped",
            report.processed, report.skipped
        );
        Ok(report)
    }

    fn open_outputs(&self) -> Result<File> {
        if let Some(parent) = self.outputs_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|source| self.io_error(parent, source))?;
            }
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.outputs_path)
            .map_err(|source| self.io_error(&self.outputs_path, source))
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> AiCycleError {
        AiCycleError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn analyze<R: Rng + ?Sized>(entry: &IdeaEntry, rng: &mut R) -> IdeaOutput {
    let quantum_analysis = quantum_ai_analysis(entry, rng);
    IdeaOutput {
        timestamp: chrono::Utc::now().timestamp(),
        agent_id: entry.agent_id.clone(),
        agent_name: entry.agent_name.clone(),
        original_idea: entry.idea.clone(),
        quantum_analysis,
        quantum_state: ANALYZED_STATE.to_string(),
        decoherence_factor: decoherence_factor(rng),
    }
}
