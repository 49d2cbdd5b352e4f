//! The context used by the election runtime.

use serde::{Deserialize, Serialize};
use sov_state::MemoryStorage;

use crate::{Address, Context, Spec};

/// A [`Context`] backed by [`MemoryStorage`], with SHA-256 module addresses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultContext {
    pub sender: Address,
}

impl Spec for DefaultContext {
    type Address = Address;
    type Storage = MemoryStorage;
    type Hasher = sha2::Sha256;
}

impl Context for DefaultContext {
    fn sender(&self) -> &Self::Address {
        &self.sender
    }

    fn new(sender: Self::Address) -> Self {
        Self { sender }
    }
}
