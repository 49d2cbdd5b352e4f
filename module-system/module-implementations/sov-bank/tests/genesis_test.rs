mod helpers;

use helpers::*;
use sov_bank::{get_genesis_token_address, get_token_address, Bank, BankConfig, TokenConfig, DEPLOYER};
use sov_modules_api::{Module, ModuleInfo, WorkingSet};
use sov_state::MemoryStorage;

#[test]
fn genesis_creates_tokens_and_balances() {
    let bank_config = create_bank_config_with_token(4, 25);
    let mut working_set = WorkingSet::new(MemoryStorage::new());
    let bank = Bank::<C>::default();
    bank.genesis(&bank_config, &mut working_set).unwrap();

    let token = &bank_config.tokens[0];
    let token_address = get_genesis_token_address::<C>(&token.token_name, token.salt);
    assert_eq!(
        token_address,
        get_token_address::<C>(&token.token_name, &DEPLOYER, token.salt)
    );

    assert_eq!(
        bank.supply_of(token_address, &mut working_set).amount,
        Some(100)
    );
    for (address, balance) in token.address_and_balances.iter() {
        assert_eq!(
            bank.balance_of(*address, token_address, &mut working_set).amount,
            Some(*balance)
        );
    }
    assert!(bank.dependencies().is_empty());
}

#[test]
fn genesis_rejects_duplicate_tokens() {
    let mut bank_config = create_bank_config_with_token(1, 10);
    bank_config.tokens.push(bank_config.tokens[0].clone());

    let mut working_set = WorkingSet::new(MemoryStorage::new());
    let bank = Bank::<C>::default();
    let result = bank.genesis(&bank_config, &mut working_set);
    assert!(result.is_err());
}

#[test]
fn genesis_rejects_supply_overflow() {
    let bank_config = BankConfig::<C> {
        tokens: vec![TokenConfig {
            token_name: "Overflow".to_owned(),
            salt: 0,
            address_and_balances: vec![
                (generate_address("a"), u64::MAX),
                (generate_address("b"), 1),
            ],
        }],
    };

    let mut working_set = WorkingSet::new(MemoryStorage::new());
    let bank = Bank::<C>::default();
    let err = bank.genesis(&bank_config, &mut working_set).unwrap_err();
    assert_eq!(err.to_string(), "Total supply overflow for token Overflow");
}

#[test]
fn same_name_different_salt_gives_different_tokens() {
    assert_ne!(
        get_genesis_token_address::<C>("Token", 0),
        get_genesis_token_address::<C>("Token", 1)
    );
}
