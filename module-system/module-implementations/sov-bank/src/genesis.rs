use anyhow::{anyhow, bail, Result};
use sov_modules_api::WorkingSet;
use tracing::debug;

use crate::token::Token;
use crate::{get_genesis_token_address, Amount, Bank};

/// The sender used to derive the addresses of the tokens created at genesis.
pub const DEPLOYER: [u8; 32] = [0; 32];

impl<C: sov_modules_api::Context> Bank<C> {
    pub(crate) fn init_module(
        &self,
        config: &<Self as sov_modules_api::Module>::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        for token_config in config.tokens.iter() {
            let token_address =
                get_genesis_token_address::<C>(&token_config.token_name, token_config.salt);

            if self.tokens.get(&token_address, working_set).is_some() {
                bail!("Token address {} already exists", token_address);
            }

            let mut total_supply: Amount = 0;
            for (address, amount) in token_config.address_and_balances.iter() {
                total_supply = total_supply.checked_add(*amount).ok_or_else(|| {
                    anyhow!("Total supply overflow for token {}", token_config.token_name)
                })?;

                // The same address may be listed more than once.
                let key = (token_address.clone(), address.clone());
                let balance = self.balances.get(&key, working_set).unwrap_or_default();
                self.balances.set(&key, &(balance + amount), working_set);
            }

            let token = Token {
                name: token_config.token_name.clone(),
                total_supply,
            };
            self.tokens.set(&token_address, &token, working_set);

            debug!(
                token = %token_config.token_name,
                %token_address,
                total_supply,
                "Created genesis token"
            );
        }
        Ok(())
    }
}
