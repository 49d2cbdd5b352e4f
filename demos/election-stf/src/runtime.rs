use sov_bank::Bank;
use sov_election::Election;
use sov_modules_api::{
    CallResponse, Context, DispatchCall, EncodeCall, Error, Genesis, Module, ModuleInfo, Spec,
    WorkingSet,
};

use crate::GenesisConfig;

/// The modules of the election runtime.
///
/// The runtime receives serialized call messages, decodes them into a
/// [`RuntimeCall`] and forwards each one to the module it is addressed to.
/// Genesis initializes the bank first, since the election checks that its
/// fee token exists.
#[derive(Clone)]
pub struct Runtime<C: Context> {
    pub bank: Bank<C>,
    pub election: Election<C>,
}

impl<C: Context> Default for Runtime<C> {
    fn default() -> Self {
        Self {
            bank: Bank::default(),
            election: Election::default(),
        }
    }
}

/// A call message of the runtime, one variant per module.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    PartialEq,
    Eq,
    Clone,
)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeCall<C: Context> {
    Bank(sov_bank::CallMessage<C>),
    Election(sov_election::CallMessage<C>),
}

impl<C: Context> Genesis for Runtime<C> {
    type Context = C;

    type Config = GenesisConfig<C>;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<<C as Spec>::Storage>,
    ) -> Result<(), Error> {
        Module::genesis(&self.bank, &config.bank, working_set)?;
        Module::genesis(&self.election, &config.election, working_set)?;
        Ok(())
    }
}

impl<C: Context> DispatchCall for Runtime<C> {
    type Context = C;

    type Decodable = RuntimeCall<C>;

    fn dispatch_call(
        &self,
        message: Self::Decodable,
        working_set: &mut WorkingSet<<C as Spec>::Storage>,
        context: &Self::Context,
    ) -> Result<CallResponse, Error> {
        match message {
            RuntimeCall::Bank(message) => self.bank.call(message, context, working_set),
            RuntimeCall::Election(message) => self.election.call(message, context, working_set),
        }
    }

    fn module_address(&self, message: &Self::Decodable) -> &<C as Spec>::Address {
        match message {
            RuntimeCall::Bank(_) => self.bank.address(),
            RuntimeCall::Election(_) => self.election.address(),
        }
    }
}

impl<C: Context> EncodeCall<Bank<C>> for Runtime<C> {
    fn encode_call(data: sov_bank::CallMessage<C>) -> Vec<u8> {
        encode(&RuntimeCall::<C>::Bank(data))
    }
}

impl<C: Context> EncodeCall<Election<C>> for Runtime<C> {
    fn encode_call(data: sov_election::CallMessage<C>) -> Vec<u8> {
        encode(&RuntimeCall::<C>::Election(data))
    }
}

fn encode<C: Context>(call: &RuntimeCall<C>) -> Vec<u8> {
    // Serializing into a vector only fails on allocation errors.
    borsh::BorshSerialize::try_to_vec(call)
        .unwrap_or_else(|e| unreachable!("Serialization to vec is infallible: {e}"))
}
