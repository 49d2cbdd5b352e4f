use borsh::{BorshDeserialize, BorshSerialize};
use sov_state::WorkingSet;

use crate::{CallResponse, Context, Error, Module, Spec};

/// Methods from this trait should be called only once, when the runtime is deployed.
pub trait Genesis {
    type Context: Context;

    /// Initial configuration for the module.
    type Config;

    /// Initializes the state of the module.
    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), Error>;
}

impl<T> Genesis for T
where
    T: Module,
{
    type Context = <Self as Module>::Context;

    type Config = <Self as Module>::Config;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), Error> {
        <Self as Module>::genesis(self, config, working_set)
    }
}

/// Routes a decoded call message to the module it belongs to.
pub trait DispatchCall {
    type Context: Context;

    /// The call message of the runtime, one variant per module.
    type Decodable: BorshSerialize + BorshDeserialize + core::fmt::Debug;

    /// Decodes a serialized call message.
    fn decode_call(serialized_message: &[u8]) -> Result<Self::Decodable, std::io::Error> {
        let mut data = serialized_message;
        Self::Decodable::deserialize(&mut data)
    }

    /// Dispatches a call message to the appropriate module.
    fn dispatch_call(
        &self,
        message: Self::Decodable,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
        context: &Self::Context,
    ) -> Result<CallResponse, Error>;

    /// Returns the address of the module the message is addressed to.
    fn module_address(&self, message: &Self::Decodable) -> &<Self::Context as Spec>::Address;
}

/// A trait that specifies how a runtime should encode the data for each module
pub trait EncodeCall<M: Module> {
    /// The encoding function
    fn encode_call(data: M::CallMessage) -> Vec<u8>;
}
