//! Wires the bank and the election into one runtime and runs transactions
//! against it, one at a time.

mod app_template;
mod config;
mod genesis_config;
mod handle;
mod runtime;

pub use app_template::{AppTemplate, TxEffect, TxError, TxReceipt};
pub use config::{from_toml_path, DeployConfig, FeeTokenConfig};
pub use genesis_config::{create_genesis_config, ElectionSetup, GenesisConfig};
pub use handle::{deploy_election, ElectionHandle};
pub use runtime::{Runtime, RuntimeCall};
