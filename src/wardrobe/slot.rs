//! The single named durable slot the wardrobe serializes into.

use crate::error::StoreError;
use std::fs;
use std::path::{Path, PathBuf};

/// Storage backend contract. One named record; whole-payload reads and
/// writes. A backend signals `StoreError::QuotaExceeded` when a write would
/// exceed its size budget, which is what drives the wardrobe's repair path.
pub trait StorageSlot: Send + Sync {
    /// `Ok(None)` when the slot has never been written.
    fn read(&self) -> Result<Option<String>, StoreError>;

    fn write(&self, payload: &str) -> Result<(), StoreError>;
}

/// File-backed slot with a byte quota. Writes go through a temp file and
/// rename so a crash mid-write never corrupts the previous record.
pub struct FileSlot {
    path: PathBuf,
    max_bytes: usize,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            path: path.into(),
            max_bytes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut full = self.path.as_os_str().to_os_string();
        full.push(".tmp");
        PathBuf::from(full)
    }
}

impl StorageSlot for FileSlot {
    fn read(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn write(&self, payload: &str) -> Result<(), StoreError> {
        if payload.len() > self.max_bytes {
            return Err(StoreError::QuotaExceeded);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        fs::write(&temp, payload)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}
