//! Read-only accessors of the bank module.
use sov_modules_api::WorkingSet;

use crate::{Amount, Bank};

/// Structure returned by the `balance_of` query.
#[derive(Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize, Clone)]
pub struct BalanceResponse {
    /// The balance amount of a given user for a given token. `None` if the user never held it.
    pub amount: Option<Amount>,
}

/// Structure returned by the `supply_of` query.
#[derive(Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize, Clone)]
pub struct TotalSupplyResponse {
    /// The amount of token supply for a given token address. `None` for unknown tokens.
    pub amount: Option<Amount>,
}

impl<C: sov_modules_api::Context> Bank<C> {
    /// Returns the balance of the user at the address `user_address` for the token
    /// stored at the address `token_address`.
    pub fn balance_of(
        &self,
        user_address: C::Address,
        token_address: C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> BalanceResponse {
        BalanceResponse {
            amount: self.get_balance_of(user_address, token_address, working_set),
        }
    }

    /// Returns the supply of a token stored at the address `token_address`.
    pub fn supply_of(
        &self,
        token_address: C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> TotalSupplyResponse {
        TotalSupplyResponse {
            amount: self.get_total_supply_of(&token_address, working_set),
        }
    }

    /// Helper function used by the `balance_of` query and by other modules.
    pub fn get_balance_of(
        &self,
        user_address: C::Address,
        token_address: C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Option<Amount> {
        self.balances.get(&(token_address, user_address), working_set)
    }

    /// Get the total supply of a token.
    pub fn get_total_supply_of(
        &self,
        token_address: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Option<Amount> {
        self.tokens
            .get(token_address, working_set)
            .map(|token| token.total_supply)
    }
}
