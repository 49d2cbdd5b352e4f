use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use sov_bank::Amount;
use sov_election::{DEFAULT_ELECTION_NAME, DEFAULT_MINIMUM_FEE};
use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::Address;

use crate::ElectionSetup;

/// The fee token created at deployment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeeTokenConfig {
    pub token_name: String,
    #[serde(default)]
    pub salt: u64,
    /// Accounts funded at deployment.
    #[serde(default)]
    pub address_and_balances: Vec<(Address, Amount)>,
}

/// Deployment parameters of an election.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeployConfig {
    #[serde(default = "default_election_name")]
    pub election_name: String,
    pub deployer: Address,
    #[serde(default = "default_minimum_fee")]
    pub minimum_fee: Amount,
    pub fee_token: FeeTokenConfig,
}

fn default_election_name() -> String {
    DEFAULT_ELECTION_NAME.to_owned()
}

fn default_minimum_fee() -> Amount {
    DEFAULT_MINIMUM_FEE
}

impl DeployConfig {
    pub fn setup(&self) -> ElectionSetup<DefaultContext> {
        ElectionSetup {
            fee_token_name: self.fee_token.token_name.clone(),
            fee_token_salt: self.fee_token.salt,
            initial_balances: self.fee_token.address_and_balances.clone(),
            minimum_fee: self.minimum_fee,
        }
    }
}

/// Reads toml file as a specific type.
pub fn from_toml_path<P: AsRef<Path>, R: DeserializeOwned>(path: P) -> anyhow::Result<R> {
    let mut contents = String::new();
    {
        let mut file = File::open(path)?;
        file.read_to_string(&mut contents)?;
    }
    tracing::debug!(size_in_bytes = contents.len(), "Parsing config file");

    let result: R = toml::from_str(&contents)?;

    Ok(result)
}
