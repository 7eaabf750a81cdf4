use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(feature = "locking")]
use super::lock::LedgerLock;
use crate::domain::LedgerDocument;
use crate::error::{LedgerError, Result};
use crate::ports::LedgerStore;

/// JSON file holding the whole ledger document.
///
/// Saves go through a temp file that is fsynced and renamed over the
/// target, so a reader sees either the previous or the new document.
pub struct JsonFileLedgerStore {
    path: PathBuf,
    #[cfg(feature = "locking")]
    _lock: LedgerLock,
}

impl JsonFileLedgerStore {
    /// Open the store at `path`, taking the writer lock.
    ///
    /// The ledger file itself does not have to exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        ensure_parent(&path)?;

        #[cfg(feature = "locking")]
        let _lock = LedgerLock::acquire(&path)?;

        if let Ok(metadata) = std::fs::metadata(&path) {
            tracing::info!(
                "[sm-02] Found existing ledger file: {} ({} bytes)",
                path.display(),
                metadata.len()
            );
        } else {
            tracing::info!("[sm-02] No existing ledger file at {}", path.display());
        }

        Ok(Self {
            path,
            #[cfg(feature = "locking")]
            _lock,
        })
    }

    /// Ledger file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_err(&self, path: &Path, source: std::io::Error) -> LedgerError {
        LedgerError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| LedgerError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

impl LedgerStore for JsonFileLedgerStore {
    fn load(&self) -> Result<Option<LedgerDocument>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_err(&self.path, e)),
        };

        if contents.trim().is_empty() {
            return Ok(None);
        }

        let malformed = |reason: String| LedgerError::Malformed {
            path: self.path.clone(),
            reason,
        };
        let value: serde_json::Value =
            serde_json::from_str(&contents).map_err(|e| malformed(e.to_string()))?;

        // `{}` counts as "nothing stored yet"
        if value.as_object().is_some_and(|object| object.is_empty()) {
            return Ok(None);
        }

        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| malformed(e.to_string()))
    }

    fn save(&mut self, document: &LedgerDocument) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(document)?;
        let temp_path = self.temp_path();

        let mut file =
            std::fs::File::create(&temp_path).map_err(|e| self.io_err(&temp_path, e))?;
        file.write_all(&bytes)
            .map_err(|e| self.io_err(&temp_path, e))?;
        file.sync_all().map_err(|e| self.io_err(&temp_path, e))?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| self.io_err(&self.path, e))?;

        tracing::debug!(
            agents = document.agents.len(),
            bytes = bytes.len(),
            "[sm-02] Ledger saved to {}",
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
