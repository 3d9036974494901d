use std::io;
use std::path::{Path, PathBuf};

use crate::core::{SavedState, SNAPSHOT_SIZE};
use crate::dispatch::HostSink;

/// Snapshot buffer backed by a file.
///
/// Without a path snapshots are dropped, which matches a host that never
/// restores state.
#[derive(Debug, Clone, Default)]
pub struct SnapshotFile {
    path: Option<PathBuf>,
}

impl SnapshotFile {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Reads the stored snapshot bytes. A missing file is not an error.
    pub fn load(&self) -> io::Result<Option<Vec<u8>>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };

        match std::fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, bytes: &[u8; SNAPSHOT_SIZE]) -> io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, bytes)
    }
}

impl HostSink for SnapshotFile {
    fn store_snapshot(&mut self, state: &SavedState) {
        match self.write(&state.to_bytes()) {
            Ok(()) => log::debug!("snapshot stored: {state:?}"),
            Err(e) => log::warn!("failed to store snapshot: {e}"),
        }
    }
}
