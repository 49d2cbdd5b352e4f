use std::collections::HashMap;
use std::fmt::Debug;

use crate::codec::{StateKeyCodec, StateValueCodec};
use crate::internal_cache::{OrderedReadsAndWrites, StorageInternalCache};
use crate::storage::{StorageKey, StorageValue};
use crate::{Event, Prefix, Storage};

/// Accumulates reads and writes on top of the underlying storage.
struct Delta<S: Storage> {
    inner: S,
    cache: StorageInternalCache,
}

/// A wrapper that adds additional writes on top of an underlying Delta.
/// These are handy for implementing operations that might revert on top of an existing
/// working set, without running the risk that the whole working set will be discarded if some particular
/// operation reverts.
///
/// All reads are recorded in the underlying delta, because even reverted transactions have
/// executed against a particular state.
struct RevertableDelta<S: Storage> {
    /// The inner (non-revertable) delta
    inner: Delta<S>,
    /// A cache containing the most recent values written. Reads are first checked
    /// against this map, and if the key is not present, the underlying Delta is checked.
    writes: HashMap<StorageKey, Option<StorageValue>>,
}

impl<S: Storage> Debug for RevertableDelta<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevertableDelta")
            .field("inner", &self.inner)
            .field("pending_writes", &self.writes.len())
            .finish()
    }
}

/// This structure is responsible for storing the `read-write` set.
///
/// It is obtained from the [`WorkingSet`] by using either the `checkpoint` or `revert` method.
pub struct StateCheckpoint<S: Storage> {
    delta: Delta<S>,
}

impl<S: Storage> StateCheckpoint<S> {
    /// Creates an empty checkpoint on top of the given storage.
    pub fn new(inner: S) -> Self {
        Self {
            delta: Delta::new(inner),
        }
    }

    /// Opens a new [`WorkingSet`] whose writes can be reverted back to this checkpoint.
    pub fn to_revertable(self) -> WorkingSet<S> {
        WorkingSet {
            delta: self.delta.get_revertable_wrapper(),
            events: Default::default(),
        }
    }

    /// Drains the accumulated reads and writes, ready to be committed to the storage.
    pub fn freeze(&mut self) -> OrderedReadsAndWrites {
        self.delta.freeze()
    }
}

/// This structure contains the read-write set and the events collected during the execution of a transaction.
/// There are two ways to convert it into a StateCheckpoint:
/// 1. By using the checkpoint() method, where all the changes are added to the underlying StateCheckpoint.
/// 2. By using the revert method, where the most recent changes are reverted and the previous `StateCheckpoint` is returned.
pub struct WorkingSet<S: Storage> {
    delta: RevertableDelta<S>,
    events: Vec<Event>,
}

impl<S: Storage> WorkingSet<S> {
    /// Creates a working set on top of a fresh checkpoint of `inner`.
    pub fn new(inner: S) -> Self {
        StateCheckpoint::new(inner).to_revertable()
    }

    /// Keeps the writes of this working set. Events are dropped, take them first
    /// with [`WorkingSet::take_events`].
    pub fn checkpoint(self) -> StateCheckpoint<S> {
        StateCheckpoint {
            delta: self.delta.commit(),
        }
    }

    /// Discards the writes and events of this working set.
    pub fn revert(self) -> StateCheckpoint<S> {
        StateCheckpoint {
            delta: self.delta.revert(),
        }
    }

    /// Records an event.
    pub fn add_event(&mut self, key: &str, value: &str) {
        self.events.push(Event::new(key, value));
    }

    /// Removes and returns all the events recorded so far.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// The events recorded so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The storage this working set reads from.
    pub fn backing(&self) -> &S {
        &self.delta.inner.inner
    }
}

/// Typed access to the raw key-value interface of a [`WorkingSet`].
pub(crate) trait StateReaderAndWriter {
    fn get(&mut self, key: &StorageKey) -> Option<StorageValue>;

    fn set(&mut self, key: &StorageKey, value: StorageValue);

    fn delete(&mut self, key: &StorageKey);

    fn set_value<K, V, Codec>(&mut self, prefix: &Prefix, key: &K, value: &V, codec: &Codec)
    where
        Codec: StateKeyCodec<K> + StateValueCodec<V>,
    {
        let storage_key = StorageKey::new(prefix, key, codec);
        let storage_value = StorageValue::new(value, codec);
        self.set(&storage_key, storage_value);
    }

    fn set_singleton<V, Codec>(&mut self, prefix: &Prefix, value: &V, codec: &Codec)
    where
        Codec: StateValueCodec<V>,
    {
        let storage_key = StorageKey::singleton(prefix);
        let storage_value = StorageValue::new(value, codec);
        self.set(&storage_key, storage_value);
    }

    fn get_decoded<V, Codec>(&mut self, storage_key: &StorageKey, codec: &Codec) -> Option<V>
    where
        Codec: StateValueCodec<V>,
    {
        let storage_value = self.get(storage_key)?;

        // It is ok to panic here. Deserialization problem means that something is terribly wrong.
        Some(codec.decode_value_unwrap(storage_value.value()))
    }

    fn get_value<K, V, Codec>(&mut self, prefix: &Prefix, key: &K, codec: &Codec) -> Option<V>
    where
        Codec: StateKeyCodec<K> + StateValueCodec<V>,
    {
        let storage_key = StorageKey::new(prefix, key, codec);
        self.get_decoded(&storage_key, codec)
    }

    fn get_singleton<V, Codec>(&mut self, prefix: &Prefix, codec: &Codec) -> Option<V>
    where
        Codec: StateValueCodec<V>,
    {
        let storage_key = StorageKey::singleton(prefix);
        self.get_decoded(&storage_key, codec)
    }

    fn remove_value<K, V, Codec>(&mut self, prefix: &Prefix, key: &K, codec: &Codec) -> Option<V>
    where
        Codec: StateKeyCodec<K> + StateValueCodec<V>,
    {
        let storage_key = StorageKey::new(prefix, key, codec);
        let storage_value = self.get_decoded(&storage_key, codec)?;
        self.delete(&storage_key);
        Some(storage_value)
    }

    fn remove_singleton<V, Codec>(&mut self, prefix: &Prefix, codec: &Codec) -> Option<V>
    where
        Codec: StateValueCodec<V>,
    {
        let storage_key = StorageKey::singleton(prefix);
        let storage_value = self.get_decoded(&storage_key, codec)?;
        self.delete(&storage_key);
        Some(storage_value)
    }

    fn delete_value<K, Codec>(&mut self, prefix: &Prefix, key: &K, codec: &Codec)
    where
        Codec: StateKeyCodec<K>,
    {
        let storage_key = StorageKey::new(prefix, key, codec);
        self.delete(&storage_key);
    }

    fn delete_singleton(&mut self, prefix: &Prefix) {
        let storage_key = StorageKey::singleton(prefix);
        self.delete(&storage_key);
    }
}

impl<S: Storage> StateReaderAndWriter for WorkingSet<S> {
    fn get(&mut self, key: &StorageKey) -> Option<StorageValue> {
        self.delta.get(key)
    }

    fn set(&mut self, key: &StorageKey, value: StorageValue) {
        self.delta.set(key, value)
    }

    fn delete(&mut self, key: &StorageKey) {
        self.delta.delete(key)
    }
}

impl<S: Storage> RevertableDelta<S> {
    fn get(&mut self, key: &StorageKey) -> Option<StorageValue> {
        if let Some(value) = self.writes.get(key) {
            return value.clone();
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &StorageKey, value: StorageValue) {
        self.writes.insert(key.clone(), Some(value));
    }

    fn delete(&mut self, key: &StorageKey) {
        self.writes.insert(key.clone(), None);
    }

    fn commit(self) -> Delta<S> {
        let mut inner = self.inner;

        for (k, v) in self.writes.into_iter() {
            if let Some(v) = v {
                inner.set(k, v);
            } else {
                inner.delete(k);
            }
        }

        inner
    }

    fn revert(self) -> Delta<S> {
        self.inner
    }
}

impl<S: Storage> Delta<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Default::default(),
        }
    }

    fn get_revertable_wrapper(self) -> RevertableDelta<S> {
        RevertableDelta {
            inner: self,
            writes: Default::default(),
        }
    }

    fn get(&mut self, key: &StorageKey) -> Option<StorageValue> {
        self.cache.get_or_fetch(key, &self.inner)
    }

    fn set(&mut self, key: StorageKey, value: StorageValue) {
        self.cache.set(key, value)
    }

    fn delete(&mut self, key: StorageKey) {
        self.cache.delete(key)
    }

    fn freeze(&mut self) -> OrderedReadsAndWrites {
        std::mem::take(&mut self.cache).into()
    }
}

impl<S: Storage> Debug for Delta<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Delta").field("cache", &self.cache).finish()
    }
}
