use std::collections::HashMap;

use crate::storage::{StorageKey, StorageValue};
use crate::Storage;

/// Caches reads and writes for a (key, value) pair. On the first read the value is fetched
/// from the underlying [`Storage`]. On following reads, the cache checks if the value we read
/// was written or read before.
#[derive(Default, Debug)]
pub struct StorageInternalCache {
    /// The first value observed in the storage for every key read.
    reads: HashMap<StorageKey, Option<StorageValue>>,
    /// The last value written for every key, `None` meaning deleted.
    writes: HashMap<StorageKey, Option<StorageValue>>,
    /// Reads that hit the storage, in the order they happened.
    ordered_db_reads: Vec<(StorageKey, Option<StorageValue>)>,
}

/// A struct that contains the values read from the DB and the values to be written, both in
/// deterministic order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct OrderedReadsAndWrites {
    /// Values read from the storage, in the order of the first access.
    pub ordered_reads: Vec<(StorageKey, Option<StorageValue>)>,
    /// Values to be written, sorted by key. `None` deletes the key.
    pub ordered_writes: Vec<(StorageKey, Option<StorageValue>)>,
}

impl OrderedReadsAndWrites {
    /// Returns `true` if nothing was read and nothing is to be written.
    pub fn is_empty(&self) -> bool {
        self.ordered_reads.is_empty() && self.ordered_writes.is_empty()
    }
}

impl From<StorageInternalCache> for OrderedReadsAndWrites {
    fn from(val: StorageInternalCache) -> Self {
        let mut writes: Vec<_> = val.writes.into_iter().collect();
        writes.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));
        Self {
            ordered_reads: val.ordered_db_reads,
            ordered_writes: writes,
        }
    }
}

impl StorageInternalCache {
    /// Gets a value from the cache or reads it from the provided storage.
    pub(crate) fn get_or_fetch<S: Storage>(
        &mut self,
        key: &StorageKey,
        value_reader: &S,
    ) -> Option<StorageValue> {
        if let Some(written) = self.writes.get(key) {
            return written.clone();
        }

        if let Some(read) = self.reads.get(key) {
            return read.clone();
        }

        let storage_value = value_reader.get(key);
        self.add_read(key.clone(), storage_value.clone());
        storage_value
    }

    pub(crate) fn set(&mut self, key: StorageKey, value: StorageValue) {
        self.writes.insert(key, Some(value));
    }

    pub(crate) fn delete(&mut self, key: StorageKey) {
        self.writes.insert(key, None);
    }

    fn add_read(&mut self, key: StorageKey, value: Option<StorageValue>) {
        self.reads.insert(key.clone(), value.clone());
        self.ordered_db_reads.push((key, value))
    }
}
