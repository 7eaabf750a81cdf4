//! # Ledger file lock
//!
//! Uses `fs2` for cross-platform advisory locking (flock on Unix, LockFile
//! on Windows). Held for as long as a file-backed store is open, so a
//! second writer fails fast instead of interleaving whole-document saves.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{LedgerError, Result};

/// Exclusive lock next to a ledger file (`<ledger>.lock`).
///
/// Released on drop (RAII). The lock file itself is left in place: every
/// holder must lock the same inode, so the path is never unlinked.
#[derive(Debug)]
pub struct LedgerLock {
    /// The lock file handle (kept open to maintain lock)
    file: File,
    /// Path to the lock file
    path: PathBuf,
}

impl LedgerLock {
    /// Lock file path for a ledger file
    pub fn lock_path(ledger_path: &Path) -> PathBuf {
        let mut name = ledger_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        ledger_path.with_file_name(name)
    }

    /// Try to take the lock without blocking.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Locked` if another handle holds the lock.
    pub fn acquire(ledger_path: &Path) -> Result<Self> {
        let path = Self::lock_path(ledger_path);
        let io_err = |source: std::io::Error| LedgerError::Io {
            path: path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(io_err)?;

        if file.try_lock_exclusive().is_err() {
            let mut contents = String::new();
            let pid = file
                .read_to_string(&mut contents)
                .ok()
                .and_then(|_| contents.trim().parse().ok());
            return Err(LedgerError::Locked {
                path: path.clone(),
                pid,
            });
        }

        file.set_len(0).map_err(io_err)?;
        file.seek(SeekFrom::Start(0)).map_err(io_err)?;
        write!(file, "{}", std::process::id()).map_err(io_err)?;
        file.flush().map_err(io_err)?;

        tracing::debug!("[sm-02] Acquired ledger lock {}", path.display());
        Ok(Self { file, path })
    }

    /// Lock file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LedgerLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_path_appends_suffix() {
        assert_eq!(
            LedgerLock::lock_path(Path::new("/data/agents_ledger.json")),
            PathBuf::from("/data/agents_ledger.json.lock")
        );
    }

    #[test]
    fn test_second_acquire_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = dir.path().join("agents_ledger.json");

        let first = LedgerLock::acquire(&ledger).unwrap();
        match LedgerLock::acquire(&ledger).unwrap_err() {
            LedgerError::Locked { pid, .. } => assert_eq!(pid, Some(std::process::id())),
            other => panic!("unexpected error {other:?}"),
        }

        drop(first);
        assert!(LedgerLock::acquire(&ledger).is_ok());
    }

    #[test]
    fn test_lock_file_kept_and_still_exclusive_after_drop() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = dir.path().join("agents_ledger.json");
        let lock = LedgerLock::acquire(&ledger).unwrap();
        let path = lock.path().to_path_buf();
        drop(lock);
        assert!(path.exists());

        let second = LedgerLock::acquire(&ledger).unwrap();
        assert!(matches!(
            LedgerLock::acquire(&ledger),
            Err(LedgerError::Locked { .. })
        ));
        assert_eq!(
            std::fs::read_to_string(second.path()).unwrap(),
            std::process::id().to_string()
        );
    }
}
