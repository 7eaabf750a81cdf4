use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::Block;
use crate::error::{MinerError, Result};
use crate::ports::ChainStore;

/// Line-delimited JSON chain file.
///
/// One block per line, opened in append mode for every write so the file
/// is never rewritten. The parent directory is created on first append.
pub struct JsonlChainStore {
    path: PathBuf,
}

impl JsonlChainStore {
    /// Create a store appending to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        if let Ok(metadata) = std::fs::metadata(&path) {
            tracing::info!(
                "[sm-01] Found existing chain file: {} ({} bytes)",
                path.display(),
                metadata.len()
            );
        } else {
            tracing::info!("[sm-01] No existing chain file at {}", path.display());
        }

        Self { path }
    }

    /// Chain file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> MinerError {
        MinerError::ChainIo {
            path: self.path.clone(),
            source,
        }
    }
}

impl ChainStore for JsonlChainStore {
    fn append(&mut self, block: &Block) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }

        let mut line = serde_json::to_string(block)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_err(e))?;
        // Single write so a line is never split across appends
        file.write_all(line.as_bytes()).map_err(|e| self.io_err(e))?;

        tracing::debug!(
            height = block.height,
            path = %self.path.display(),
            "[sm-01] Block appended"
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
