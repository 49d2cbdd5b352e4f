use anyhow::Result;
use sov_bank::Amount;
use sov_modules_api::WorkingSet;

use super::types::{Candidate, Voter};
use super::Election;
use crate::{ElectionError, ElectionState};

impl<C: sov_modules_api::Context> Election<C> {
    /// The name given at deployment.
    pub fn election_name(&self, working_set: &mut WorkingSet<C::Storage>) -> Result<String> {
        Ok(self.name.get_or_err(working_set)?)
    }

    /// The deployer of the election.
    pub fn owner(&self, working_set: &mut WorkingSet<C::Storage>) -> Result<C::Address> {
        Ok(self.owner.get_or_err(working_set)?)
    }

    /// The current phase.
    pub fn state(&self, working_set: &mut WorkingSet<C::Storage>) -> Result<ElectionState> {
        Ok(self.state.get_or_err(working_set)?)
    }

    /// The fees collected and not yet withdrawn.
    pub fn balance_of(&self, working_set: &mut WorkingSet<C::Storage>) -> Amount {
        self.balance.get(working_set).unwrap_or_default()
    }

    /// The candidate record of `address`, or an unregistered record.
    pub fn candidates(
        &self,
        address: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Candidate {
        self.candidates.get(address, working_set).unwrap_or_default()
    }

    /// The voter record of `address`, or an unregistered record.
    pub fn voters(&self, address: &C::Address, working_set: &mut WorkingSet<C::Storage>) -> Voter {
        self.voters.get(address, working_set).unwrap_or_default()
    }

    /// The number of registered candidates.
    pub fn get_total_candidates(&self, working_set: &mut WorkingSet<C::Storage>) -> u64 {
        self.candidate_list.len(working_set) as u64
    }

    /// Candidate addresses in registration order.
    pub fn candidate_list(&self, working_set: &mut WorkingSet<C::Storage>) -> Vec<C::Address> {
        self.candidate_list.iter(working_set).collect()
    }

    /// The smallest accepted fee payment.
    pub fn minimum_fee(&self, working_set: &mut WorkingSet<C::Storage>) -> Result<Amount> {
        Ok(self.minimum_fee.get_or_err(working_set)?)
    }

    /// The bank token in which fees are paid.
    pub fn fee_token(&self, working_set: &mut WorkingSet<C::Storage>) -> Result<C::Address> {
        Ok(self.fee_token.get_or_err(working_set)?)
    }

    /// The candidate with the most votes, once the vote has ended.
    ///
    /// Among candidates sharing the highest count, the earliest registered wins.
    pub fn announce_winner(&self, working_set: &mut WorkingSet<C::Storage>) -> Result<C::Address> {
        self.exit_if_not_in(ElectionState::Ended, working_set)?;

        let mut winner: Option<(C::Address, u64)> = None;
        for address in self.candidate_list(working_set) {
            let votes = self.candidates(&address, working_set).vote_count;
            match &winner {
                Some((_, best)) if *best >= votes => {}
                _ => winner = Some((address, votes)),
            }
        }

        winner
            .map(|(address, _)| address)
            .ok_or_else(|| ElectionError::NoCandidates.into())
    }
}
