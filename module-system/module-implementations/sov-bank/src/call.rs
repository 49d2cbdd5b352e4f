use anyhow::{bail, Context as _, Result};
use sov_modules_api::{CallResponse, WorkingSet};
use tracing::debug;

use crate::{Amount, Bank, Coins};

/// This enumeration represents the available call messages for interacting with the sov-bank module.
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
pub enum CallMessage<C: sov_modules_api::Context> {
    /// Transfers a specified amount of tokens to the specified address.
    Transfer {
        /// The address to which the tokens will be transferred.
        to: C::Address,
        /// The amount of tokens to transfer.
        coins: Coins<C>,
    },
}

impl<C: sov_modules_api::Context> Bank<C> {
    /// Transfers `coins` from the sender of the transaction to `to`.
    pub fn transfer(
        &self,
        to: C::Address,
        coins: Coins<C>,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.transfer_from(context.sender(), &to, coins, working_set)
    }

    /// Transfers `coins` from `from` to `to`.
    ///
    /// The caller is responsible for checking that `from` authorized the
    /// transfer. Moving tokens to the source address is a no-op.
    pub fn transfer_from(
        &self,
        from: &C::Address,
        to: &C::Address,
        coins: Coins<C>,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.move_balance(from, to, &coins, working_set)
            .with_context(|| format!("Failed transfer from={} to={} of coins({})", from, to, coins))?;

        debug!(%from, %to, %coins, "Transferred coins");
        Ok(CallResponse::default())
    }

    fn move_balance(
        &self,
        from: &C::Address,
        to: &C::Address,
        coins: &Coins<C>,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        let token = self.tokens.get_or_err(&coins.token_address, working_set)?;
        if from == to {
            return Ok(());
        }

        let from_key = (coins.token_address.clone(), from.clone());
        let to_key = (coins.token_address.clone(), to.clone());

        let from_balance = self
            .check_balance(&from_key, coins.amount, working_set)
            .with_context(|| format!("Incorrect balance on={} for token={}", from, token.name))?;

        // Can't overflow: the sum of all balances equals `total_supply`, which is an `Amount`.
        let to_balance = self.balances.get(&to_key, working_set).unwrap_or_default() + coins.amount;

        self.balances.set(&from_key, &from_balance, working_set);
        self.balances.set(&to_key, &to_balance, working_set);

        Ok(())
    }

    // Checks that `amount` can be deducted from the balance under `key`.
    // Returns the balance after the subtraction.
    fn check_balance(
        &self,
        key: &(C::Address, C::Address),
        amount: Amount,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Amount> {
        let balance = self.balances.get(key, working_set).unwrap_or_default();
        match balance.checked_sub(amount) {
            Some(new_balance) => Ok(new_balance),
            None => bail!("Insufficient funds for {}", key.1),
        }
    }
}
