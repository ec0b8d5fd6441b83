//! In-memory key-value medium, mostly used by tests.

use std::{
    collections::HashMap,
    io,
    sync::{
        Mutex, MutexGuard,
        atomic::{AtomicBool, Ordering},
    },
};

use super::{KeyValueStore, ensure_valid_key};
use crate::dao::storage::{StorageError, StorageResult};

/// Mutex-guarded map of records. Writes can be switched off to exercise
/// failure handling in callers.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
    reject_writes: AtomicBool,
}

impl MemoryKeyValueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set`/`remove` fail (or succeed again).
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ensure_writable(&self, key: &str) -> StorageResult<()> {
        ensure_valid_key(key)?;
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable(
                format!("write to `{key}` rejected"),
                io::Error::new(io::ErrorKind::PermissionDenied, "store is read-only"),
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        ensure_valid_key(key)?;
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.ensure_writable(key)?;
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.ensure_writable(key)?;
        self.entries().remove(key);
        Ok(())
    }
}
