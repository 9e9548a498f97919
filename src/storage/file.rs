//! File-backed storage: one JSON document per key inside a data directory.

use super::StorageBackend;
use crate::core::{Result, StoreError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const EXTENSION: &str = "json";

pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| {
            StoreError::Storage(format!(
                "Failed to create data directory '{}': {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, EXTENSION)))
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).map_err(|e| {
            StoreError::Storage(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Ok(Some(raw))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let mut tmp = NamedTempFile::new_in(&self.root)
            .map_err(|e| StoreError::Storage(format!("Failed to create temp file: {}", e)))?;
        tmp.write_all(value.as_bytes())
            .map_err(|e| StoreError::Storage(format!("Failed to write '{}': {}", key, e)))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::Storage(format!("Failed to sync '{}': {}", key, e)))?;
        tmp.persist(&path).map_err(|e| {
            StoreError::Storage(format!("Failed to rename into '{}': {}", path.display(), e))
        })?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StoreError::Storage(format!("Failed to delete '{}': {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root)?;
        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Keys become file names, so only a conservative charset is accepted.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
