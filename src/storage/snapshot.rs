use std::fs;
use std::path::{Path, PathBuf};

use super::error::StorageError;
use crate::model::Record;

/// File name of the single snapshot slot.
const SNAPSHOT_FILE: &str = "snapshot.json";

/// Single-slot, read-through cache over the last loaded or saved [`Record`].
///
/// There is exactly one slot for the whole application: the snapshot models
/// one in-progress or last-saved record, not a collection. Reads are memoized
/// until [`invalidate`](Self::invalidate) drops the memo; writes go through
/// to disk and refresh it.
pub struct SnapshotCache {
    path: PathBuf,
    cached: Option<Record>,
}

impl SnapshotCache {
    /// Creates a cache rooted in the XDG data directory.
    ///
    /// The directory (`~/.local/share/dimlog/`) is created if it does not
    /// already exist.
    pub fn new() -> Result<Self, StorageError> {
        let dir = default_data_dir()?;
        fs::create_dir_all(&dir)?;
        Ok(Self {
            path: dir.join(SNAPSHOT_FILE),
            cached: None,
        })
    }

    /// Creates a cache backed by the given slot file.
    #[cfg(test)]
    pub(crate) fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: None,
        }
    }

    /// Returns the stored record, or the blank record if none exists.
    ///
    /// A missing or unparseable slot file is treated as absent; this never
    /// surfaces an error. The result is memoized until the next
    /// [`store`](Self::store) or [`invalidate`](Self::invalidate).
    pub fn load(&mut self) -> Record {
        if let Some(record) = &self.cached {
            return record.clone();
        }
        let record = read_slot(&self.path).unwrap_or_else(Record::blank);
        self.cached = Some(record.clone());
        record
    }

    /// Persists `record` as the new snapshot, overwriting any prior value.
    pub fn store(&mut self, record: &Record) -> Result<(), StorageError> {
        let file = fs::File::create(&self.path)?;
        serde_json::to_writer(file, record)?;
        self.cached = Some(record.clone());
        Ok(())
    }

    /// Drops the memoized record so the next [`load`](Self::load) re-reads
    /// the slot file.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

/// Reads and parses the slot file, folding every failure into `None`.
fn read_slot(path: &Path) -> Option<Record> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Returns the dimlog data directory (`~/.local/share/dimlog/`).
pub fn default_data_dir() -> Result<PathBuf, StorageError> {
    let data_dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
    Ok(data_dir.join("dimlog"))
}
