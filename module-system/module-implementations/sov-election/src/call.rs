use anyhow::{ensure, Context as _, Result};
use sov_bank::{Amount, Coins};
use sov_modules_api::{CallResponse, Context, WorkingSet};
use tracing::{debug, info};

use super::types::{Candidate, Voter};
use super::Election;
use crate::{ElectionError, ElectionState};

/// Call actions supported by the module.
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
pub enum CallMessage<C: Context> {
    /// Pays `amount` of the fee token to the election. Makes the sender eligible as a candidate.
    PayFee {
        /// The amount paid.
        amount: Amount,
    },
    /// Registers `candidate`, which must have paid the fee.
    AddCandidate {
        /// Address of the candidate.
        candidate: C::Address,
        /// Display name of the candidate.
        name: String,
    },
    /// Registers a voter. Owner only.
    RegisterVoter {
        /// Address of the voter.
        voter: C::Address,
    },
    /// Opens the vote. Owner only.
    StartVote,
    /// Votes for `candidate`. The sender is the voter.
    Vote {
        /// Address of the candidate.
        candidate: C::Address,
    },
    /// Closes the vote. Owner only.
    EndVote,
    /// Sends the collected fees to the owner. Owner only.
    WithdrawRegistrationFunds,
}

impl<C: sov_modules_api::Context> Election<C> {
    /// Transfers `amount` of the fee token from the sender to the election.
    pub(crate) fn pay_fee(
        &self,
        amount: Amount,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        let minimum = self.minimum_fee.get_or_err(working_set)?;
        ensure!(
            amount >= minimum,
            ElectionError::InsufficientFee { amount, minimum }
        );

        let sender = context.sender();
        ensure!(
            sender != &self.address,
            ElectionError::InvalidPayer(sender.to_string())
        );
        let coins = Coins {
            amount,
            token_address: self.fee_token.get_or_err(working_set)?,
        };
        self.bank
            .transfer_from(sender, &self.address, coins, working_set)
            .context("Fee payment failed")?;

        let balance = self
            .balance
            .get(working_set)
            .unwrap_or_default()
            .checked_add(amount)
            .ok_or(ElectionError::Overflow("Election balance"))?;
        self.balance.set(&balance, working_set);

        let paid = self
            .fees_paid
            .get(sender, working_set)
            .unwrap_or_default()
            .checked_add(amount)
            .ok_or(ElectionError::Overflow("Paid fees"))?;
        self.fees_paid.set(sender, &paid, working_set);

        working_set.add_event(
            "Election: pay_fee",
            &format!("Fee of {amount} paid by {sender}"),
        );
        debug!(%sender, amount, balance, "Fee paid");

        Ok(CallResponse::default())
    }

    /// Registers a candidate that paid the fee.
    pub(crate) fn add_candidate(
        &self,
        candidate: C::Address,
        name: String,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        ensure!(
            self.fees_paid.get(&candidate, working_set).is_some(),
            ElectionError::FeeNotPaid(candidate.to_string())
        );
        self.exit_if_candidate_registered(&candidate, working_set)?;

        self.candidates
            .set(&candidate, &Candidate::new(name.clone()), working_set);
        self.candidate_list.push(&candidate, working_set);

        working_set.add_event(
            "Election: add_candidate",
            &format!("Candidate {name} was added: {candidate}"),
        );
        debug!(%candidate, %name, "Candidate added");

        Ok(CallResponse::default())
    }

    /// Adds voter to the allow list. Must be called by the owner.
    pub(crate) fn register_voter(
        &self,
        voter: C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_owner(context, working_set)?;

        let registered = self
            .voters
            .get(&voter, working_set)
            .map(|voter| voter.registered)
            .unwrap_or_default();
        ensure!(
            !registered,
            ElectionError::AlreadyRegistered(voter.to_string())
        );

        self.voters.set(&voter, &Voter::fresh(), working_set);

        working_set.add_event(
            "Election: register_voter",
            &format!("Voter was added: {voter}"),
        );
        debug!(%voter, "Voter registered");

        Ok(CallResponse::default())
    }

    /// Opens the vote. Must be called by the owner.
    pub(crate) fn start_vote(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_owner(context, working_set)?;
        self.transition(ElectionState::Created, ElectionState::Open, working_set)?;

        working_set.add_event("Election: start_vote", "Vote was opened");
        Ok(CallResponse::default())
    }

    /// Votes for a candidate. The sender is the voter.
    pub(crate) fn vote(
        &self,
        candidate_address: C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_in(ElectionState::Open, working_set)?;

        let sender = context.sender();
        let voter = self.voters.get(sender, working_set).unwrap_or_default();
        ensure!(
            voter.registered,
            ElectionError::VoterNotRegistered(sender.to_string())
        );
        ensure!(
            !voter.voted,
            ElectionError::AlreadyVoted(sender.to_string())
        );

        let mut candidate = self
            .candidates
            .get(&candidate_address, working_set)
            .filter(|candidate| candidate.registered)
            .ok_or_else(|| ElectionError::CandidateNotRegistered(candidate_address.to_string()))?;

        candidate.vote_count = candidate
            .vote_count
            .checked_add(1)
            .ok_or(ElectionError::Overflow("Vote count"))?;

        self.candidates
            .set(&candidate_address, &candidate, working_set);
        self.voters.set(sender, &Voter::voted(), working_set);

        working_set.add_event(
            "Election: vote",
            &format!("Vote from: {sender} accepted for {candidate_address}"),
        );
        debug!(voter = %sender, candidate = %candidate_address, "Vote accepted");

        Ok(CallResponse::default())
    }

    /// Closes the vote. Must be called by the owner.
    pub(crate) fn end_vote(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_owner(context, working_set)?;
        self.transition(ElectionState::Open, ElectionState::Ended, working_set)?;

        working_set.add_event("Election: end_vote", "Vote was closed");
        Ok(CallResponse::default())
    }

    /// Sends the whole balance to the owner. Must be called by the owner.
    pub(crate) fn withdraw_registration_funds(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        let owner = self.exit_if_not_owner(context, working_set)?;

        let balance = self.balance.get(working_set).unwrap_or_default();
        let fee_token = self.fee_token.get_or_err(working_set)?;
        // Plain bank transfers to the module address are swept together with the fees.
        let holdings = self
            .bank
            .get_balance_of(self.address.clone(), fee_token.clone(), working_set)
            .unwrap_or_default();
        if holdings == 0 {
            working_set.add_event(
                "Election: withdraw_registration_funds",
                "Nothing to withdraw",
            );
            return Ok(CallResponse::default());
        }

        let coins = Coins {
            amount: holdings,
            token_address: fee_token,
        };
        self.bank
            .transfer_from(&self.address, &owner, coins, working_set)
            .context("Withdrawal of the registration funds failed")?;
        self.balance.set(&0, working_set);

        working_set.add_event(
            "Election: withdraw_registration_funds",
            &format!("{holdings} withdrawn to {owner}"),
        );
        info!(%owner, amount = holdings, fees = balance, "Registration funds withdrawn");

        Ok(CallResponse::default())
    }

    fn transition(
        &self,
        from: ElectionState,
        to: ElectionState,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        self.exit_if_not_in(from, working_set)?;
        self.state.set(&to, working_set);
        debug!(%from, %to, "Election state changed");
        Ok(())
    }

    pub(crate) fn exit_if_not_in(
        &self,
        expected: ElectionState,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        let actual = self.state.get_or_err(working_set)?;
        ensure!(
            actual == expected,
            ElectionError::InvalidState { expected, actual }
        );
        Ok(())
    }

    // Returns the owner on success.
    fn exit_if_not_owner(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<C::Address> {
        let owner = self.owner.get_or_err(working_set)?;
        ensure!(&owner == context.sender(), ElectionError::Unauthorized);
        Ok(owner)
    }

    fn exit_if_candidate_registered(
        &self,
        candidate: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        let registered = self
            .candidates
            .get(candidate, working_set)
            .map(|candidate| candidate.registered)
            .unwrap_or_default();
        ensure!(
            !registered,
            ElectionError::AlreadyRegistered(candidate.to_string())
        );
        Ok(())
    }
}
