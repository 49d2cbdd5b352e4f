use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::default_context::DefaultContext;
use crate::utils::generate_address;
use crate::{Address, AddressBech32, Context, Prefix};

#[test]
fn test_account_bech32m_display() {
    let expected_addr: [u8; 32] = core::array::from_fn(|i| i as u8 + 1);
    let account = AddressBech32::from(Address::from(expected_addr));
    assert_eq!(
        account.to_string(),
        "sov1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5z5tpwxqergd3c8g7rusqqsn6hm"
    );
}

#[test]
fn test_address_from_str() {
    let address = Address::from([11; 32]);
    let parsed = Address::from_str(&address.to_string()).unwrap();
    assert_eq!(address, parsed);

    assert!(Address::from_str("not an address").is_err());
    assert!(Address::try_from([1u8; 20].as_slice()).is_err());
}

#[test]
fn test_address_borsh_serialization() {
    let address = Address::from([3; 32]);
    let serialized = address.try_to_vec().unwrap();
    assert_eq!(serialized.len(), 32);

    let deserialized = Address::try_from_slice(&serialized).unwrap();
    assert_eq!(address, deserialized);
}

#[test]
fn test_module_prefix_hash_depends_on_every_part() {
    let module = Prefix::new_module("sov_election", "Election");
    let other_path = Prefix::new_module("sov_bank", "Election");
    let storage = Prefix::new_storage("sov_election", "Election", "owner");

    let module_hash = module.hash::<DefaultContext>();
    assert_ne!(module_hash, other_path.hash::<DefaultContext>());
    assert_ne!(module_hash, storage.hash::<DefaultContext>());
    assert_eq!(
        module_hash,
        Prefix::new_module("sov_election", "Election").hash::<DefaultContext>()
    );
}

#[test]
fn test_storage_prefix_layout() {
    let prefix: sov_state::Prefix = Prefix::new_storage("sov_bank", "Bank", "tokens").into();
    assert_eq!(prefix, sov_state::Prefix::new(b"sov_bank/Bank/tokens/".to_vec()));
}

#[test]
fn test_generate_address_is_deterministic() {
    let first = generate_address::<DefaultContext>("alice");
    let second = generate_address::<DefaultContext>("alice");
    let other = generate_address::<DefaultContext>("bob");

    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[test]
fn test_context_sender() {
    let sender = Address::from([5; 32]);
    let context = DefaultContext::new(sender);
    assert_eq!(context.sender(), &sender);
}

#[test]
fn test_generated_address_bech32() {
    // sha256("alice")
    let alice = generate_address::<DefaultContext>("alice");
    assert_eq!(
        alice.to_string(),
        "sov190vqdjtlpcq27xslcveglfmr4ynfwg7gmw86cnun4acakxrdd6gq789f7h"
    );
}

proptest::proptest! {
    #[test]
    fn test_any_address_survives_bech32(bytes in proptest::prelude::any::<[u8; 32]>()) {
        let address = Address::from(bytes);
        let parsed = Address::from_str(&address.to_string()).unwrap();
        proptest::prop_assert_eq!(parsed, address);
        proptest::prop_assert!(address.to_string().starts_with("sov1"));
    }
}
