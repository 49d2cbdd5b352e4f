use election_stf::{deploy_election, ElectionHandle, ElectionSetup};
use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::utils::generate_address;
use sov_modules_api::Address;

pub type C = DefaultContext;

pub const INITIAL_BALANCE: u64 = 1_000;

pub struct TestAccounts {
    pub owner: Address,
    pub alice: Address,
    pub bob: Address,
    pub carol: Address,
}

impl TestAccounts {
    pub fn new() -> Self {
        Self {
            owner: generate_address::<C>("owner"),
            alice: generate_address::<C>("alice"),
            bob: generate_address::<C>("bob"),
            carol: generate_address::<C>("carol"),
        }
    }
}

pub fn funded_setup(accounts: &[Address]) -> ElectionSetup<C> {
    ElectionSetup {
        initial_balances: accounts
            .iter()
            .map(|address| (*address, INITIAL_BALANCE))
            .collect(),
        ..ElectionSetup::default()
    }
}

/// Deploys "Dapp Elections" with every test account funded.
pub fn deploy(accounts: &TestAccounts) -> ElectionHandle {
    let setup = funded_setup(&[accounts.owner, accounts.alice, accounts.bob, accounts.carol]);
    deploy_election("Dapp Elections", accounts.owner, setup).unwrap()
}

pub fn register_candidate(handle: &ElectionHandle, candidate: Address, name: &str) {
    handle.pay_fee(candidate, 10).unwrap();
    handle.add_candidate(candidate, candidate, name).unwrap();
}
