use sov_bank::{Amount, Coins};
use sov_election::{Candidate, CallMessage, ElectionState, Voter};
use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::{Address, ModuleInfo};
use sov_state::MemoryStorage;
use tracing::info;

use crate::{
    create_genesis_config, AppTemplate, ElectionSetup, Runtime, RuntimeCall, TxEffect, TxError,
    TxReceipt,
};

type C = DefaultContext;

/// A deployed election.
///
/// Every operation takes the address of its sender and runs as one transaction:
/// it either succeeds and commits, or fails with [`TxError::Reverted`] and leaves
/// the state as it was. The handle can be shared between threads.
pub struct ElectionHandle {
    app: AppTemplate<C, Runtime<C>>,
}

/// Deploys a new election named `name`, owned by `deployer`, with a fresh fee
/// token described by `setup`.
pub fn deploy_election(
    name: &str,
    deployer: Address,
    setup: ElectionSetup<C>,
) -> anyhow::Result<ElectionHandle> {
    let genesis_config = create_genesis_config(name, deployer, &setup);
    let app = AppTemplate::new(MemoryStorage::new(), Runtime::default());
    app.init_chain(&genesis_config)?;

    let handle = ElectionHandle { app };
    info!(%name, address = %handle.address(), owner = %deployer, "Deployed election");
    Ok(handle)
}

impl ElectionHandle {
    /// The address of the election module. Fees are paid to it.
    pub fn address(&self) -> Address {
        *self.app.runtime.election.address()
    }

    pub fn app(&self) -> &AppTemplate<C, Runtime<C>> {
        &self.app
    }

    pub fn state_root(&self) -> [u8; 32] {
        self.app.state_root()
    }

    /// Applies an arbitrary runtime call, failing if it reverts.
    pub fn apply(&self, sender: Address, call: RuntimeCall<C>) -> Result<TxReceipt, TxError> {
        let (receipt, error) = self.app.execute(sender, call)?;
        match (&receipt.effect, error) {
            (TxEffect::Reverted(reason), Some(error)) => Err(TxError::Reverted {
                reason: reason.clone(),
                error,
            }),
            (TxEffect::Reverted(reason), None) => Err(TxError::Reverted {
                reason: reason.clone(),
                error: anyhow::anyhow!("{reason}"),
            }),
            (TxEffect::Successful, _) => Ok(receipt),
        }
    }

    fn election_call(
        &self,
        sender: Address,
        message: CallMessage<C>,
    ) -> Result<TxReceipt, TxError> {
        self.apply(sender, RuntimeCall::Election(message))
    }

    pub fn pay_fee(&self, sender: Address, amount: Amount) -> Result<TxReceipt, TxError> {
        self.election_call(sender, CallMessage::PayFee { amount })
    }

    pub fn add_candidate(
        &self,
        sender: Address,
        candidate: Address,
        name: &str,
    ) -> Result<TxReceipt, TxError> {
        self.election_call(
            sender,
            CallMessage::AddCandidate {
                candidate,
                name: name.to_owned(),
            },
        )
    }

    pub fn register_voter(&self, sender: Address, voter: Address) -> Result<TxReceipt, TxError> {
        self.election_call(sender, CallMessage::RegisterVoter { voter })
    }

    pub fn start_vote(&self, sender: Address) -> Result<TxReceipt, TxError> {
        self.election_call(sender, CallMessage::StartVote)
    }

    pub fn vote(&self, sender: Address, candidate: Address) -> Result<TxReceipt, TxError> {
        self.election_call(sender, CallMessage::Vote { candidate })
    }

    pub fn end_vote(&self, sender: Address) -> Result<TxReceipt, TxError> {
        self.election_call(sender, CallMessage::EndVote)
    }

    pub fn withdraw_registration_funds(&self, sender: Address) -> Result<TxReceipt, TxError> {
        self.election_call(sender, CallMessage::WithdrawRegistrationFunds)
    }

    /// Moves `amount` of the fee token from `sender` to `to`.
    pub fn transfer_fee_token(
        &self,
        sender: Address,
        to: Address,
        amount: Amount,
    ) -> Result<TxReceipt, TxError> {
        let coins = Coins {
            amount,
            token_address: self.fee_token()?,
        };
        self.apply(sender, RuntimeCall::Bank(sov_bank::CallMessage::Transfer { to, coins }))
    }

    pub fn election_name(&self) -> Result<String, TxError> {
        let mut working_set = self.app.query_working_set();
        self.app
            .runtime
            .election
            .election_name(&mut working_set)
            .map_err(TxError::Query)
    }

    pub fn owner(&self) -> Result<Address, TxError> {
        let mut working_set = self.app.query_working_set();
        self.app
            .runtime
            .election
            .owner(&mut working_set)
            .map_err(TxError::Query)
    }

    pub fn state(&self) -> Result<ElectionState, TxError> {
        let mut working_set = self.app.query_working_set();
        self.app
            .runtime
            .election
            .state(&mut working_set)
            .map_err(TxError::Query)
    }

    pub fn minimum_fee(&self) -> Result<Amount, TxError> {
        let mut working_set = self.app.query_working_set();
        self.app
            .runtime
            .election
            .minimum_fee(&mut working_set)
            .map_err(TxError::Query)
    }

    pub fn fee_token(&self) -> Result<Address, TxError> {
        let mut working_set = self.app.query_working_set();
        self.app
            .runtime
            .election
            .fee_token(&mut working_set)
            .map_err(TxError::Query)
    }

    /// Fees held by the election.
    pub fn balance_of(&self) -> Amount {
        let mut working_set = self.app.query_working_set();
        self.app.runtime.election.balance_of(&mut working_set)
    }

    pub fn candidates(&self, address: &Address) -> Candidate {
        let mut working_set = self.app.query_working_set();
        self.app
            .runtime
            .election
            .candidates(address, &mut working_set)
    }

    pub fn voters(&self, address: &Address) -> Voter {
        let mut working_set = self.app.query_working_set();
        self.app.runtime.election.voters(address, &mut working_set)
    }

    pub fn get_total_candidates(&self) -> u64 {
        let mut working_set = self.app.query_working_set();
        self.app
            .runtime
            .election
            .get_total_candidates(&mut working_set)
    }

    /// Candidate addresses in registration order.
    pub fn candidate_list(&self) -> Vec<Address> {
        let mut working_set = self.app.query_working_set();
        self.app
            .runtime
            .election
            .candidate_list(&mut working_set)
    }

    pub fn announce_winner(&self) -> Result<Address, TxError> {
        let mut working_set = self.app.query_working_set();
        self.app
            .runtime
            .election
            .announce_winner(&mut working_set)
            .map_err(TxError::Query)
    }

    /// The fee token balance of `owner`, `None` if it never held any.
    pub fn token_balance(&self, owner: Address) -> Result<Option<Amount>, TxError> {
        let fee_token = self.fee_token()?;
        let mut working_set = self.app.query_working_set();
        Ok(self
            .app
            .runtime
            .bank
            .get_balance_of(owner, fee_token, &mut working_set))
    }
}
