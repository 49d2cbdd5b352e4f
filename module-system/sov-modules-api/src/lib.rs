//! The interface of the election module system: addresses, execution
//! contexts, and the traits every module and runtime implements.

mod bech32;
pub mod default_context;
mod dispatch;
mod error;
mod prefix;
mod response;
mod serde_address;
#[cfg(test)]
mod tests;
pub mod utils;

use core::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
pub use dispatch::{DispatchCall, EncodeCall, Genesis};
pub use error::Error;
pub use prefix::Prefix;
pub use response::CallResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
pub use sha2::Digest;
#[cfg(feature = "macros")]
pub use sov_modules_macros::ModuleInfo;
pub use sov_state::{Event, StateMap, StateValue, StateVec, Storage, WorkingSet};

pub use crate::bech32::{AddressBech32, Bech32ParseError};

/// The byte length of an [`Address`].
pub const ADDRESS_LENGTH: usize = 32;

/// The requirements on the address type of a [`Spec`].
pub trait AddressTrait:
    PartialEq
    + Eq
    + Hash
    + Clone
    + Debug
    + Display
    + AsRef<[u8]>
    + for<'a> TryFrom<&'a [u8], Error = anyhow::Error>
    + From<[u8; ADDRESS_LENGTH]>
    + FromStr<Err = anyhow::Error>
    + BorshSerialize
    + BorshDeserialize
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
}

/// The default address of the module system: 32 bytes, displayed as a bech32m
/// string with the `sov` human readable part.
#[derive(
    PartialEq, Clone, Copy, Eq, Hash, PartialOrd, Ord, borsh::BorshDeserialize, borsh::BorshSerialize,
)]
pub struct Address {
    addr: [u8; ADDRESS_LENGTH],
}

impl AddressTrait for Address {}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.addr
    }
}

impl<'a> TryFrom<&'a [u8]> for Address {
    type Error = anyhow::Error;

    fn try_from(addr: &'a [u8]) -> Result<Self, Self::Error> {
        if addr.len() != ADDRESS_LENGTH {
            anyhow::bail!("Address must be {ADDRESS_LENGTH} bytes long");
        }
        let mut addr_bytes = [0u8; ADDRESS_LENGTH];
        addr_bytes.copy_from_slice(addr);
        Ok(Self { addr: addr_bytes })
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(addr: [u8; ADDRESS_LENGTH]) -> Self {
        Self { addr }
    }
}

impl FromStr for Address {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let address_bech32 = AddressBech32::from_str(s)?;
        Ok(Self::from(address_bech32.to_byte_array()?))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", AddressBech32::from(self))
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", AddressBech32::from(self))
    }
}

/// The `Spec` trait configures the primitives used by a particular instance of the module system.
///
/// `Spec` is almost always implemented on a Context object; since all modules are generic
/// over a Context, the storage backend or the hash function can be swapped without touching
/// module implementations.
pub trait Spec {
    /// The Address type used by the modules. Typically calculated as the hash of some identity.
    type Address: AddressTrait;

    /// State storage backing the working sets handed to the modules.
    type Storage: Storage;

    /// The hasher used for module addresses and derived identifiers.
    type Hasher: Digest<OutputSize = sha2::digest::typenum::U32>;
}

/// A context contains information which is passed to modules during
/// transaction execution. Currently, context includes the sender of the transaction.
///
/// Context objects also implement the [`Spec`] trait, which specifies the types to be used in this
/// instance of the module system.
pub trait Context: Spec + Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Sender of the transaction.
    fn sender(&self) -> &Self::Address;

    /// Constructor for the Context.
    fn new(sender: Self::Address) -> Self;
}

/// A module reacts to call messages by changing its state.
pub trait Module {
    /// Execution context.
    type Context: Context;

    /// Configuration for the genesis method.
    type Config;

    /// Module defined argument to the call method.
    type CallMessage: Debug + BorshSerialize + BorshDeserialize;

    /// Genesis is called when the module is deployed and can be used to set initial state values in the module.
    fn genesis(
        &self,
        _config: &Self::Config,
        _working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), Error> {
        Ok(())
    }

    /// Call allows interaction with the module and invokes state changes.
    /// It takes a module defined type and a context as parameters.
    fn call(
        &self,
        message: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<CallResponse, Error>;
}

/// Every module has to implement this trait. It is usually derived with
/// `#[derive(ModuleInfo)]`.
pub trait ModuleInfo: Default {
    /// Execution context.
    type Context: Context;

    /// Returns address of the module.
    fn address(&self) -> &<Self::Context as Spec>::Address;

    /// Returns the addresses of the modules this module depends on.
    fn dependencies(&self) -> Vec<&<Self::Context as Spec>::Address>;
}
