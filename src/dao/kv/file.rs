//! File-based key-value medium: one JSON document per key.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{KeyValueStore, ensure_valid_key};
use crate::dao::storage::{StorageError, StorageResult};

/// Stores each record as `<key>.json` under a data directory.
///
/// Writes land in `<key>.json.tmp` first and are renamed over the target, so a
/// reader never observes a half-written record.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Open (and create if needed) the data directory.
    pub fn open(base_dir: impl AsRef<Path>) -> StorageResult<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(|source| {
            StorageError::unavailable(
                format!("failed to create data directory `{}`", base_dir.display()),
                source,
            )
        })?;
        Ok(Self { base_dir })
    }

    /// Directory holding the record files.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn record_path(&self, key: &str) -> StorageResult<PathBuf> {
        ensure_valid_key(key)?;
        Ok(self.base_dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.record_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::unavailable(
                format!("failed to read `{}`", path.display()),
                source,
            )),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.record_path(key)?;
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, value).map_err(|source| {
            StorageError::unavailable(format!("failed to write `{}`", temp_path.display()), source)
        })?;
        fs::rename(&temp_path, &path).map_err(|source| {
            StorageError::unavailable(format!("failed to replace `{}`", path.display()), source)
        })?;

        debug!(key, path = %path.display(), "record written");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.record_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key, "record removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::unavailable(
                format!("failed to remove `{}`", path.display()),
                source,
            )),
        }
    }
}
