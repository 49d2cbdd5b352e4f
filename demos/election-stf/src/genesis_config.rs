use sov_bank::{get_genesis_token_address, Amount, BankConfig, TokenConfig};
use sov_election::{ElectionConfig, DEFAULT_MINIMUM_FEE};
use sov_modules_api::Context;

/// The genesis configuration of every module of the [`crate::Runtime`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisConfig<C: Context> {
    pub bank: BankConfig<C>,
    pub election: ElectionConfig<C>,
}

/// Describes the fee token created for an election, and the election's minimum fee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectionSetup<C: Context> {
    pub fee_token_name: String,
    pub fee_token_salt: u64,
    /// Accounts funded with the fee token at deployment.
    pub initial_balances: Vec<(C::Address, Amount)>,
    pub minimum_fee: Amount,
}

impl<C: Context> Default for ElectionSetup<C> {
    fn default() -> Self {
        Self {
            fee_token_name: "ElectionFee".to_owned(),
            fee_token_salt: 0,
            initial_balances: Vec::new(),
            minimum_fee: DEFAULT_MINIMUM_FEE,
        }
    }
}

/// Builds the genesis configuration of an election named `name`, owned by `deployer`.
pub fn create_genesis_config<C: Context>(
    name: &str,
    deployer: C::Address,
    setup: &ElectionSetup<C>,
) -> GenesisConfig<C> {
    let fee_token =
        get_genesis_token_address::<C>(&setup.fee_token_name, setup.fee_token_salt);

    GenesisConfig {
        bank: BankConfig {
            tokens: vec![TokenConfig {
                token_name: setup.fee_token_name.clone(),
                salt: setup.fee_token_salt,
                address_and_balances: setup.initial_balances.clone(),
            }],
        },
        election: ElectionConfig {
            name: name.to_owned(),
            owner: deployer,
            fee_token,
            minimum_fee: setup.minimum_fee,
        },
    }
}
