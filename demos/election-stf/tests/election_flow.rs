mod helpers;

use election_stf::{deploy_election, ElectionSetup, TxError};
use helpers::*;
use sov_election::{ElectionError, ElectionState};
use sov_modules_api::utils::generate_address;

#[test]
fn test_deploy() {
    let accounts = TestAccounts::new();
    let handle = deploy(&accounts);

    assert_eq!(handle.election_name().unwrap(), "Dapp Elections");
    assert_eq!(handle.owner().unwrap(), accounts.owner);
    assert_eq!(handle.state().unwrap(), ElectionState::Created);
    assert_eq!(handle.balance_of(), 0);
    assert_eq!(handle.get_total_candidates(), 0);
    assert_eq!(handle.minimum_fee().unwrap(), 1);
    assert_eq!(
        handle.token_balance(accounts.alice).unwrap(),
        Some(INITIAL_BALANCE)
    );
}

#[test]
fn test_deploy_with_zero_minimum_fee_fails() {
    let owner = generate_address::<C>("owner");
    let setup = ElectionSetup {
        minimum_fee: 0,
        ..ElectionSetup::default()
    };

    assert!(deploy_election("Dapp Elections", owner, setup).is_err());
}

#[test]
fn test_pay_fee() {
    let accounts = TestAccounts::new();
    let handle = deploy(&accounts);

    let receipt = handle.pay_fee(accounts.alice, 100).unwrap();

    assert!(receipt.is_successful());
    assert!(!receipt.events.is_empty());
    assert_eq!(handle.balance_of(), 100);
    assert_eq!(
        handle.token_balance(accounts.alice).unwrap(),
        Some(INITIAL_BALANCE - 100)
    );
    assert_eq!(handle.token_balance(handle.address()).unwrap(), Some(100));
}

#[test]
fn test_add_candidate() {
    let accounts = TestAccounts::new();
    let handle = deploy(&accounts);

    register_candidate(&handle, accounts.alice, "Alice");

    let candidate = handle.candidates(&accounts.alice);
    assert!(candidate.registered);
    assert_eq!(candidate.name, "Alice");
    assert_eq!(candidate.vote_count, 0);
    assert_eq!(handle.get_total_candidates(), 1);
    assert_eq!(handle.candidate_list(), vec![accounts.alice]);
}

#[test]
fn test_add_candidate_without_fee_is_rejected() {
    let accounts = TestAccounts::new();
    let handle = deploy(&accounts);
    let root_before = handle.state_root();

    let err = handle
        .add_candidate(accounts.alice, accounts.alice, "Alice")
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ElectionError>(),
        Some(ElectionError::FeeNotPaid(_))
    ));
    assert_eq!(handle.state_root(), root_before);
    assert_eq!(handle.get_total_candidates(), 0);
}

#[test]
fn test_register_voter() {
    let accounts = TestAccounts::new();
    let handle = deploy(&accounts);
    assert!(!handle.voters(&accounts.bob).registered);

    handle.register_voter(accounts.owner, accounts.bob).unwrap();

    let voter = handle.voters(&accounts.bob);
    assert!(voter.registered);
    assert!(!voter.voted);
}

#[test]
fn test_register_voter_by_non_owner_is_rejected() {
    let accounts = TestAccounts::new();
    let handle = deploy(&accounts);

    let err = handle.register_voter(accounts.alice, accounts.bob).unwrap_err();

    assert_eq!(
        err.downcast_ref::<ElectionError>(),
        Some(&ElectionError::Unauthorized)
    );
    assert!(!handle.voters(&accounts.bob).registered);
}

#[test]
fn test_full_election() {
    let accounts = TestAccounts::new();
    let handle = deploy(&accounts);

    register_candidate(&handle, accounts.alice, "Alice");
    register_candidate(&handle, accounts.bob, "Bob");
    handle.register_voter(accounts.owner, accounts.carol).unwrap();
    handle.register_voter(accounts.owner, accounts.owner).unwrap();

    handle.start_vote(accounts.owner).unwrap();
    assert_eq!(handle.state().unwrap(), ElectionState::Open);

    handle.vote(accounts.carol, accounts.bob).unwrap();
    handle.vote(accounts.owner, accounts.bob).unwrap();
    assert_eq!(handle.candidates(&accounts.bob).vote_count, 2);
    assert!(handle.voters(&accounts.carol).voted);

    // The winner is only known once the vote is closed.
    assert!(handle.announce_winner().is_err());

    handle.end_vote(accounts.owner).unwrap();
    assert_eq!(handle.state().unwrap(), ElectionState::Ended);
    assert_eq!(handle.announce_winner().unwrap(), accounts.bob);
}

#[test]
fn test_double_vote_is_rejected() {
    let accounts = TestAccounts::new();
    let handle = deploy(&accounts);

    register_candidate(&handle, accounts.alice, "Alice");
    handle.register_voter(accounts.owner, accounts.carol).unwrap();
    handle.start_vote(accounts.owner).unwrap();
    handle.vote(accounts.carol, accounts.alice).unwrap();
    let root_before = handle.state_root();

    let err = handle.vote(accounts.carol, accounts.alice).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ElectionError>(),
        Some(ElectionError::AlreadyVoted(_))
    ));
    assert_eq!(handle.candidates(&accounts.alice).vote_count, 1);
    assert_eq!(handle.state_root(), root_before);
}

#[test]
fn test_vote_before_start_is_rejected() {
    let accounts = TestAccounts::new();
    let handle = deploy(&accounts);

    register_candidate(&handle, accounts.alice, "Alice");
    handle.register_voter(accounts.owner, accounts.carol).unwrap();

    let err = handle.vote(accounts.carol, accounts.alice).unwrap_err();

    assert_eq!(
        err.downcast_ref::<ElectionError>(),
        Some(&ElectionError::InvalidState {
            expected: ElectionState::Open,
            actual: ElectionState::Created,
        })
    );
}

#[test]
fn test_end_vote_requires_open_election() {
    let accounts = TestAccounts::new();
    let handle = deploy(&accounts);

    let err = handle.end_vote(accounts.owner).unwrap_err();

    assert!(matches!(err, TxError::Reverted { .. }));
    assert_eq!(handle.state().unwrap(), ElectionState::Created);
}

#[test]
fn test_withdraw_registration_funds() {
    let accounts = TestAccounts::new();
    let handle = deploy(&accounts);

    handle.pay_fee(accounts.alice, 100).unwrap();
    handle.pay_fee(accounts.bob, 50).unwrap();
    assert_eq!(handle.balance_of(), 150);

    handle.withdraw_registration_funds(accounts.owner).unwrap();

    assert_eq!(handle.balance_of(), 0);
    assert_eq!(
        handle.token_balance(accounts.owner).unwrap(),
        Some(INITIAL_BALANCE + 150)
    );
    assert_eq!(handle.token_balance(handle.address()).unwrap(), Some(0));
}

#[test]
fn test_withdraw_by_non_owner_is_rejected() {
    let accounts = TestAccounts::new();
    let handle = deploy(&accounts);
    handle.pay_fee(accounts.alice, 100).unwrap();

    let err = handle.withdraw_registration_funds(accounts.alice).unwrap_err();

    assert_eq!(
        err.downcast_ref::<ElectionError>(),
        Some(&ElectionError::Unauthorized)
    );
    assert_eq!(handle.balance_of(), 100);
}

#[test]
fn test_fee_token_transfer() {
    let accounts = TestAccounts::new();
    let handle = deploy(&accounts);
    let stranger = generate_address::<C>("stranger");

    handle
        .transfer_fee_token(accounts.alice, stranger, 40)
        .unwrap();
    handle.pay_fee(stranger, 40).unwrap();

    assert_eq!(handle.token_balance(stranger).unwrap(), Some(0));
    assert_eq!(handle.balance_of(), 40);
}

#[test]
fn test_election_address_cannot_pay_fee() {
    let accounts = TestAccounts::new();
    let handle = deploy(&accounts);
    handle.pay_fee(accounts.alice, 100).unwrap();
    let root_before = handle.state_root();

    let err = handle.pay_fee(handle.address(), 500).unwrap_err();

    assert_eq!(
        err.downcast_ref::<ElectionError>(),
        Some(&ElectionError::InvalidPayer(handle.address().to_string()))
    );
    assert_eq!(handle.state_root(), root_before);
    assert_eq!(handle.balance_of(), 100);

    handle.withdraw_registration_funds(accounts.owner).unwrap();
    assert_eq!(handle.balance_of(), 0);
    assert_eq!(
        handle.token_balance(accounts.owner).unwrap(),
        Some(INITIAL_BALANCE + 100)
    );
}

#[test]
fn test_plain_transfer_to_election_is_withdrawable() {
    let accounts = TestAccounts::new();
    let handle = deploy(&accounts);

    handle
        .transfer_fee_token(accounts.alice, handle.address(), 50)
        .unwrap();
    assert_eq!(handle.balance_of(), 0);
    assert_eq!(handle.token_balance(handle.address()).unwrap(), Some(50));

    handle.withdraw_registration_funds(accounts.owner).unwrap();

    assert_eq!(handle.token_balance(handle.address()).unwrap(), Some(0));
    assert_eq!(
        handle.token_balance(accounts.owner).unwrap(),
        Some(INITIAL_BALANCE + 50)
    );
}
