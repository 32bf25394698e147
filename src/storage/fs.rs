//! Filesystem storage backend
//!
//! Layout is `{root}/{state}/{filename}`. Writes go to a uniquely named
//! `.part` sibling first and are renamed into place once complete.

use crate::storage::traits::{Storage, StorageResult};
use crate::storage::sanitize_component;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Storage rooted at a local directory
#[derive(Debug)]
pub struct FsStorage {
    root: PathBuf,
    part_counter: AtomicU64,
}

impl FsStorage {
    /// Opens storage at `root`, creating the directory if needed
    pub fn new(root: &Path) -> StorageResult<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            part_counter: AtomicU64::new(0),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn state_dir(&self, state: &str) -> StorageResult<PathBuf> {
        Ok(self.root.join(sanitize_component(state)?))
    }

    fn part_path(&self, target: &Path) -> PathBuf {
        let n = self.part_counter.fetch_add(1, Ordering::Relaxed);
        let mut name = target
            .file_name()
            .map(|s| s.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.{}.part", std::process::id(), n));
        target.with_file_name(name)
    }
}

impl Storage for FsStorage {
    fn prepare_state(&self, state: &str) -> StorageResult<PathBuf> {
        let dir = self.state_dir(state)?;
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    fn path_for(&self, state: &str, filename: &str) -> StorageResult<PathBuf> {
        Ok(self.state_dir(state)?.join(sanitize_component(filename)?))
    }

    fn contains(&self, state: &str, filename: &str) -> StorageResult<bool> {
        let path = self.path_for(state, filename)?;
        Ok(path.try_exists()?)
    }

    fn store(&self, state: &str, filename: &str, bytes: &[u8]) -> StorageResult<PathBuf> {
        let target = self.path_for(state, filename)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let part = self.part_path(&target);
        let written = (|| -> std::io::Result<()> {
            let mut file = fs::File::create(&part)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            Ok(())
        })();

        if let Err(e) = written.and_then(|()| fs::rename(&part, &target)) {
            let _ = fs::remove_file(&part);
            return Err(e.into());
        }

        tracing::debug!("Stored {} bytes at {}", bytes.len(), target.display());
        Ok(target)
    }
}
