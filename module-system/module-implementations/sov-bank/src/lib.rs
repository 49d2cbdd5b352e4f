#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod call;
mod genesis;
mod query;
mod token;
mod utils;

pub use call::CallMessage;
pub use genesis::DEPLOYER;
pub use query::{BalanceResponse, TotalSupplyResponse};
use sov_modules_api::{CallResponse, Error, ModuleInfo, StateMap, WorkingSet};
use token::Token;
pub use token::{Amount, Coins};
pub use utils::{get_genesis_token_address, get_token_address};

/// Configuration of one token created at genesis.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(bound = "C::Address: serde::Serialize + serde::de::DeserializeOwned")]
pub struct TokenConfig<C: sov_modules_api::Context> {
    /// The name of the token.
    pub token_name: String,
    /// Random value used, together with the name, to derive the token address.
    #[serde(default)]
    pub salt: u64,
    /// The initial balances.
    pub address_and_balances: Vec<(C::Address, Amount)>,
}

/// Initial configuration for sov-bank module.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(bound = "C::Address: serde::Serialize + serde::de::DeserializeOwned")]
pub struct BankConfig<C: sov_modules_api::Context> {
    /// The tokens created at genesis.
    pub tokens: Vec<TokenConfig<C>>,
}

/// The sov-bank module manages user balances of fungible tokens.
///
/// Tokens are created at genesis. Afterwards, balances move between
/// addresses through [`CallMessage::Transfer`] or, for other modules,
/// through [`Bank::transfer_from`].
#[derive(ModuleInfo, Clone)]
pub struct Bank<C: sov_modules_api::Context> {
    /// The address of the sov-bank module.
    #[address]
    pub(crate) address: C::Address,

    /// A mapping of addresses to tokens in the sov-bank.
    #[state]
    pub(crate) tokens: StateMap<C::Address, Token>,

    /// Balances, keyed by token address and then by user address.
    #[state]
    pub(crate) balances: StateMap<(C::Address, C::Address), Amount>,
}

impl<C: sov_modules_api::Context> sov_modules_api::Module for Bank<C> {
    type Context = C;

    type Config = BankConfig<C>;

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
        match msg {
            CallMessage::Transfer { to, coins } => {
                Ok(self.transfer(to, coins, context, working_set)?)
            }
        }
    }
}
