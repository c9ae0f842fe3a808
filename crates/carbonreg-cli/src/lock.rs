//! Advisory lock serializing processes that share a journal.
//!
//! The lock lives in a `<journal>.lock` sidecar so a mutating command can
//! hold it before the journal itself exists.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use log::debug;

/// Held lock on a journal; released on drop.
#[derive(Debug)]
pub struct JournalLock {
    file: File,
    path: PathBuf,
}

impl JournalLock {
    /// Blocks until no other process holds any lock on `journal`.
    ///
    /// Mutating commands hold this across replay, apply and append.
    pub fn exclusive(journal: &Path) -> io::Result<Self> {
        let lock = Self::open(journal)?;
        lock.file.lock_exclusive()?;
        debug!("holding exclusive lock {}", lock.path.display());
        Ok(lock)
    }

    /// Blocks until no writer holds the lock on `journal`.
    pub fn shared(journal: &Path) -> io::Result<Self> {
        let lock = Self::open(journal)?;
        lock.file.lock_shared()?;
        debug!("holding shared lock {}", lock.path.display());
        Ok(lock)
    }

    fn open(journal: &Path) -> io::Result<Self> {
        let path = lock_path(journal);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        Ok(Self { file, path })
    }
}

impl Drop for JournalLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            debug!("failed to release {}: {}", self.path.display(), e);
        }
    }
}

/// Sidecar lock path for `journal`.
pub fn lock_path(journal: &Path) -> PathBuf {
    let mut name: OsString = journal.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lock_file_sits_next_to_journal() {
        let path = lock_path(Path::new("/data/registry.crj"));
        assert_eq!(path, PathBuf::from("/data/registry.crj.lock"));
    }

    #[test]
    fn exclusive_lock_excludes_other_handles() {
        let temp_dir = TempDir::new().unwrap();
        let journal = temp_dir.path().join("registry.crj");

        let held = JournalLock::exclusive(&journal).unwrap();
        assert!(!journal.exists());

        let other = File::open(lock_path(&journal)).unwrap();
        assert!(other.try_lock_shared().is_err());

        drop(held);
        other.try_lock_exclusive().unwrap();
    }

    #[test]
    fn shared_locks_coexist() {
        let temp_dir = TempDir::new().unwrap();
        let journal = temp_dir.path().join("registry.crj");

        let _first = JournalLock::shared(&journal).unwrap();
        let _second = JournalLock::shared(&journal).unwrap();
        let other = File::open(lock_path(&journal)).unwrap();
        assert!(other.try_lock_exclusive().is_err());
    }
}
