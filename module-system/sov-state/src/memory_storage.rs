use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::internal_cache::OrderedReadsAndWrites;
use crate::storage::{Storage, StorageKey, StorageValue};

/// The state root of a storage that never had a commit.
pub const EMPTY_ROOT: [u8; 32] = *b"EMPTY_ELECTION_STATE_ROOT_HASH__";

#[derive(Debug)]
struct StateDb {
    values: BTreeMap<StorageKey, StorageValue>,
    root: [u8; 32],
    version: u64,
}

impl Default for StateDb {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
            root: EMPTY_ROOT,
            version: 0,
        }
    }
}

/// An in-memory [`Storage`].
///
/// Every successful commit bumps the version and folds the written key-value
/// pairs into a rolling SHA-256 state root, so two storages that received the
/// same sequence of commits share the same root.
#[derive(Clone, Default, Debug)]
pub struct MemoryStorage {
    db: Arc<RwLock<StateDb>>,
}

impl MemoryStorage {
    /// Creates a new, empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of commits applied so far.
    pub fn version(&self) -> u64 {
        self.read_db().version
    }

    fn read_db(&self) -> RwLockReadGuard<'_, StateDb> {
        // A poisoned lock means a writer panicked halfway, the state can't be trusted anymore.
        self.db
            .read()
            .unwrap_or_else(|e| panic!("Storage lock is poisoned: {e}"))
    }

    fn write_db(&self) -> RwLockWriteGuard<'_, StateDb> {
        self.db
            .write()
            .unwrap_or_else(|e| panic!("Storage lock is poisoned: {e}"))
    }
}

fn next_root(
    prev_root: &[u8; 32],
    version: u64,
    writes: &[(StorageKey, Option<StorageValue>)],
) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(prev_root);
    hasher.update(version.to_be_bytes());
    for (key, value) in writes {
        let key = key.as_ref();
        hasher.update((key.len() as u64).to_be_bytes());
        hasher.update(key);
        match value {
            Some(value) => {
                hasher.update([1u8]);
                hasher.update((value.value().len() as u64).to_be_bytes());
                hasher.update(value.value());
            }
            None => hasher.update([0u8]),
        }
    }
    hasher.finalize().into()
}

impl Storage for MemoryStorage {
    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        self.read_db().values.get(key).cloned()
    }

    fn get_state_root(&self) -> [u8; 32] {
        self.read_db().root
    }

    fn validate_and_commit(
        &self,
        state_accesses: OrderedReadsAndWrites,
    ) -> Result<[u8; 32], anyhow::Error> {
        let mut db = self.write_db();

        for (key, read_value) in state_accesses.ordered_reads.iter() {
            if db.values.get(key) != read_value.as_ref() {
                anyhow::bail!("Stale read of key {key}, the storage was modified concurrently");
            }
        }

        if state_accesses.ordered_writes.is_empty() {
            return Ok(db.root);
        }

        let version = db.version + 1;
        let root = next_root(&db.root, version, &state_accesses.ordered_writes);

        for (key, value) in state_accesses.ordered_writes {
            match value {
                Some(value) => {
                    db.values.insert(key, value);
                }
                None => {
                    db.values.remove(&key);
                }
            }
        }

        db.version = version;
        db.root = root;
        debug!(version, root = hex::encode(root), "Committed state update");

        Ok(root)
    }

    fn is_empty(&self) -> bool {
        self.read_db().version == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(key: &'static str, value: &'static str) -> (StorageKey, Option<StorageValue>) {
        (key.into(), Some(value.into()))
    }

    #[test]
    fn test_commit_updates_values_and_root() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());
        assert_eq!(storage.get_state_root(), EMPTY_ROOT);

        let root = storage
            .validate_and_commit(OrderedReadsAndWrites {
                ordered_reads: vec![],
                ordered_writes: vec![write("key", "value")],
            })
            .unwrap();

        assert!(!storage.is_empty());
        assert_eq!(storage.version(), 1);
        assert_ne!(root, EMPTY_ROOT);
        assert_eq!(storage.get_state_root(), root);
        assert_eq!(storage.get(&"key".into()), Some("value".into()));
    }

    #[test]
    fn test_stale_read_is_rejected() {
        let storage = MemoryStorage::new();
        storage
            .validate_and_commit(OrderedReadsAndWrites {
                ordered_reads: vec![],
                ordered_writes: vec![write("key", "value")],
            })
            .unwrap();
        let root_before = storage.get_state_root();

        let result = storage.validate_and_commit(OrderedReadsAndWrites {
            ordered_reads: vec![("key".into(), None)],
            ordered_writes: vec![write("key", "other")],
        });

        assert!(result.is_err());
        assert_eq!(storage.get_state_root(), root_before);
        assert_eq!(storage.get(&"key".into()), Some("value".into()));
    }

    #[test]
    fn test_same_commits_give_same_root() {
        let first = MemoryStorage::new();
        let second = MemoryStorage::new();

        for storage in [&first, &second] {
            storage
                .validate_and_commit(OrderedReadsAndWrites {
                    ordered_reads: vec![],
                    ordered_writes: vec![write("a", "1"), write("b", "2")],
                })
                .unwrap();
        }

        assert_eq!(first.get_state_root(), second.get_state_root());
    }

    #[test]
    fn test_delete_removes_key() {
        let storage = MemoryStorage::new();
        storage
            .validate_and_commit(OrderedReadsAndWrites {
                ordered_reads: vec![],
                ordered_writes: vec![write("key", "value")],
            })
            .unwrap();
        storage
            .validate_and_commit(OrderedReadsAndWrites {
                ordered_reads: vec![],
                ordered_writes: vec![("key".into(), None)],
            })
            .unwrap();

        assert_eq!(storage.get(&"key".into()), None);
        assert_eq!(storage.version(), 2);
    }
}
