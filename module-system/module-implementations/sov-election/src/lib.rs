//! An election where candidates register by paying a fee, the owner
//! registers voters and drives the voting phases, and each voter casts a
//! single vote.

mod call;
mod error;
mod genesis;
mod query;
mod types;

use sov_bank::{Amount, Bank};
use sov_modules_api::{CallResponse, Error, ModuleInfo, StateMap, StateValue, StateVec, WorkingSet};
use tracing::debug;

pub use crate::call::CallMessage;
pub use crate::error::ElectionError;
pub use crate::types::{Candidate, ElectionState, Voter};

/// The name given to an election when the deployment doesn't pick one.
pub const DEFAULT_ELECTION_NAME: &str = "Dapp Elections";

/// The minimum fee used when the deployment doesn't set one.
pub const DEFAULT_MINIMUM_FEE: Amount = 1;

fn default_minimum_fee() -> Amount {
    DEFAULT_MINIMUM_FEE
}

/// Initial configuration of the election.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(bound = "C::Address: serde::Serialize + serde::de::DeserializeOwned")]
pub struct ElectionConfig<C: sov_modules_api::Context> {
    /// The name of the election. Never changes after deployment.
    pub name: String,
    /// The deployer, allowed to run the owner-only operations.
    pub owner: C::Address,
    /// The bank token in which the registration fees are paid.
    pub fee_token: C::Address,
    /// The smallest accepted fee payment.
    #[serde(default = "default_minimum_fee")]
    pub minimum_fee: Amount,
}

/// The election module.
///
/// Fees are held by the bank at the address of this module, so `balance`
/// always equals the module's bank balance of `fee_token`.
#[derive(ModuleInfo, Clone)]
pub struct Election<C: sov_modules_api::Context> {
    #[address]
    pub address: C::Address,

    #[state]
    pub(crate) name: StateValue<String>,

    #[state]
    pub(crate) owner: StateValue<C::Address>,

    #[state]
    pub(crate) state: StateValue<ElectionState>,

    /// Fees collected and not yet withdrawn.
    #[state]
    pub(crate) balance: StateValue<Amount>,

    #[state]
    pub(crate) minimum_fee: StateValue<Amount>,

    #[state]
    pub(crate) fee_token: StateValue<C::Address>,

    #[state]
    pub(crate) candidates: StateMap<C::Address, Candidate>,

    /// Candidate addresses in registration order.
    #[state]
    pub(crate) candidate_list: StateVec<C::Address>,

    #[state]
    pub(crate) voters: StateMap<C::Address, Voter>,

    /// Total fee paid by each address. Presence makes the address eligible as a candidate.
    #[state]
    pub(crate) fees_paid: StateMap<C::Address, Amount>,

    #[module]
    pub(crate) bank: Bank<C>,
}

impl<C: sov_modules_api::Context> sov_modules_api::Module for Election<C> {
    type Context = C;

    type Config = ElectionConfig<C>;

    type CallMessage = CallMessage<C>;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), Error> {
        Ok(self.init_module(config, working_set)?)
    }

    fn call(
        &self,
        msg: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, Error> {
        debug!(sender = %context.sender(), message = ?msg, "Election call");

        match msg {
            CallMessage::PayFee { amount } => Ok(self.pay_fee(amount, context, working_set)?),

            CallMessage::AddCandidate { candidate, name } => {
                Ok(self.add_candidate(candidate, name, working_set)?)
            }

            CallMessage::RegisterVoter { voter } => {
                Ok(self.register_voter(voter, context, working_set)?)
            }

            CallMessage::StartVote => Ok(self.start_vote(context, working_set)?),

            CallMessage::Vote { candidate } => Ok(self.vote(candidate, context, working_set)?),

            CallMessage::EndVote => Ok(self.end_vote(context, working_set)?),

            CallMessage::WithdrawRegistrationFunds => {
                Ok(self.withdraw_registration_funds(context, working_set)?)
            }
        }
    }
}
