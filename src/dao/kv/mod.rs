mod file;
mod memory;

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;

use crate::dao::storage::{StorageError, StorageResult};

/// Durable medium holding named string records.
///
/// Every call is synchronous and complete when it returns; callers that need a
/// read-modify-write cycle serialise it themselves.
pub trait KeyValueStore: Send + Sync {
    /// Read a record, `None` when the key was never written or was removed.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Replace a record with `value`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Remove a record entirely. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

fn ensure_valid_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey { key: key.into() })
    }
}
