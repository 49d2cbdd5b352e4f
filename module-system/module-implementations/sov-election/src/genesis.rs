use anyhow::{ensure, Result};
use sov_modules_api::WorkingSet;
use tracing::info;

use super::Election;
use crate::ElectionState;

impl<C: sov_modules_api::Context> Election<C> {
    pub(crate) fn init_module(
        &self,
        config: &<Self as sov_modules_api::Module>::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        ensure!(
            config.minimum_fee > 0,
            "The minimum fee must be positive, got {}",
            config.minimum_fee
        );
        ensure!(
            self.bank
                .get_total_supply_of(&config.fee_token, working_set)
                .is_some(),
            "Fee token {} does not exist",
            config.fee_token
        );

        self.name.set(&config.name, working_set);
        self.owner.set(&config.owner, working_set);
        self.state.set(&ElectionState::Created, working_set);
        self.balance.set(&0, working_set);
        self.minimum_fee.set(&config.minimum_fee, working_set);
        self.fee_token.set(&config.fee_token, working_set);

        info!(
            name = %config.name,
            owner = %config.owner,
            address = %self.address,
            "Election deployed"
        );
        Ok(())
    }
}
