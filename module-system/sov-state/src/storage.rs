use std::fmt::Display;
use std::sync::Arc;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::codec::{StateKeyCodec, StateValueCodec};
use crate::internal_cache::OrderedReadsAndWrites;
use crate::utils::AlignedVec;
use crate::Prefix;

/// The key type of a [`Storage`]: a prefix followed by an encoded key.
#[derive(
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    BorshDeserialize,
    BorshSerialize,
)]
pub struct StorageKey {
    key: Arc<Vec<u8>>,
}

impl StorageKey {
    /// Returns a cheap clone of the underlying bytes.
    pub fn key(&self) -> Arc<Vec<u8>> {
        self.key.clone()
    }

    /// Creates a new [`StorageKey`] that combines a prefix and a key.
    pub fn new<K, KC>(prefix: &Prefix, key: &K, codec: &KC) -> Self
    where
        KC: StateKeyCodec<K>,
    {
        let encoded_key = AlignedVec::new(codec.encode_key(key));

        let full_key = Vec::<u8>::with_capacity(prefix.len() + encoded_key.len());
        let mut full_key = AlignedVec::new(full_key);
        full_key.extend(prefix.as_aligned_vec());
        full_key.extend(&encoded_key);

        Self {
            key: Arc::new(full_key.into_inner()),
        }
    }

    /// Creates a new [`StorageKey`] made of the prefix alone. Used by
    /// containers that hold a single value.
    pub fn singleton(prefix: &Prefix) -> Self {
        Self {
            key: Arc::new(prefix.as_aligned_vec().clone().into_inner()),
        }
    }
}

impl AsRef<Vec<u8>> for StorageKey {
    fn as_ref(&self) -> &Vec<u8> {
        &self.key
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.key.as_ref()))
    }
}

/// A serialized value suitable for storing. Internally uses an [`Arc<Vec<u8>>`] for cheap cloning.
#[derive(
    Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize, Default,
)]
pub struct StorageValue {
    value: Arc<Vec<u8>>,
}

impl From<Vec<u8>> for StorageValue {
    fn from(value: Vec<u8>) -> Self {
        Self {
            value: Arc::new(value),
        }
    }
}

impl StorageValue {
    /// Create a new storage value by serializing the input with the given codec.
    pub fn new<V, VC>(value: &V, codec: &VC) -> Self
    where
        VC: StateValueCodec<V>,
    {
        let encoded_value = codec.encode_value(value);
        Self {
            value: Arc::new(encoded_value),
        }
    }

    /// Get the bytes of this value.
    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

/// An interface for storing and retrieving values in the storage.
///
/// Implementations are cheap to clone: every clone is a handle on the same
/// underlying data.
pub trait Storage: Clone + Send + Sync {
    /// Returns the value corresponding to the key or None if key is absent.
    fn get(&self, key: &StorageKey) -> Option<StorageValue>;

    /// Returns the latest state root hash from the storage.
    fn get_state_root(&self) -> [u8; 32];

    /// Validates the reads recorded in `state_accesses` against the current
    /// content of the storage, applies the writes and returns the new state root.
    ///
    /// Nothing is written if one of the reads is stale.
    fn validate_and_commit(
        &self,
        state_accesses: OrderedReadsAndWrites,
    ) -> Result<[u8; 32], anyhow::Error>;

    /// Indicates if storage is empty or not.
    /// Useful during initialization
    fn is_empty(&self) -> bool;
}

// Used only in tests.
#[cfg(test)]
impl From<&'static str> for StorageKey {
    fn from(key: &'static str) -> Self {
        Self {
            key: Arc::new(key.as_bytes().to_vec()),
        }
    }
}

// Used only in tests.
#[cfg(test)]
impl From<&'static str> for StorageValue {
    fn from(value: &'static str) -> Self {
        Self {
            value: Arc::new(value.as_bytes().to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use borsh::{BorshDeserialize, BorshSerialize};

    use super::*;
    use crate::codec::BorshCodec;

    #[test]
    fn test_storage_key_serialization() {
        let key = StorageKey::new(&Prefix::new(b"election/".to_vec()), &7u64, &BorshCodec);

        let bytes = key.try_to_vec().unwrap();
        assert_eq!(StorageKey::try_from_slice(&bytes).unwrap(), key);

        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(serde_json::from_str::<StorageKey>(&json).unwrap(), key);
    }

    #[test]
    fn test_storage_value_serialization() {
        let value = StorageValue::new(&"Dapp Elections".to_owned(), &BorshCodec);

        let bytes = value.try_to_vec().unwrap();
        let decoded = StorageValue::try_from_slice(&bytes).unwrap();
        assert_eq!(decoded, value);
        let name: String = BorshCodec.decode_value_unwrap(decoded.value());
        assert_eq!(name, "Dapp Elections");
    }
}
