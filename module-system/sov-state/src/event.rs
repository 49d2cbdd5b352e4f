use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// A key-value pair emitted by a module while executing a transaction.
///
/// Events are collected in the [`crate::WorkingSet`] and dropped together with
/// the writes if the transaction reverts.
#[derive(
    Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Event {
    key: String,
    value: String,
}

impl Event {
    /// Creates a new event.
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }

    /// The key of the event, usually `"<Module>: <operation>"`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The human readable description of the event.
    pub fn value(&self) -> &str {
        &self.value
    }
}
