use std::io::Write;
use std::path::Path;

use election_deployer::{deploy, read_txs, replay};
use election_stf::{from_toml_path, DeployConfig, TxEffect};
use sov_election::ElectionState;
use tempfile::NamedTempFile;

fn load_demo_config() -> DeployConfig {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("deploy_config.toml");
    from_toml_path(path).unwrap()
}

#[test]
fn test_demo_config_deploys() {
    let config = load_demo_config();
    let handle = deploy(&config).unwrap();

    assert_eq!(handle.election_name().unwrap(), "Dapp Elections");
    assert_eq!(handle.owner().unwrap(), config.deployer);
    assert_eq!(handle.state().unwrap(), ElectionState::Created);
}

#[test]
fn test_demo_txs_replay() {
    let config = load_demo_config();
    let handle = deploy(&config).unwrap();
    let txs = read_txs(&Path::new(env!("CARGO_MANIFEST_DIR")).join("demo_txs.json")).unwrap();
    let bob = txs[3].sender;

    let receipts = replay(&handle, txs).unwrap();

    // The second vote of the same voter is the only rejected transaction.
    let reverted: Vec<_> = receipts
        .iter()
        .enumerate()
        .filter(|(_, receipt)| !receipt.is_successful())
        .map(|(index, _)| index)
        .collect();
    assert_eq!(reverted, vec![7]);
    assert!(matches!(receipts[7].effect, TxEffect::Reverted(_)));

    assert_eq!(handle.state().unwrap(), ElectionState::Ended);
    assert_eq!(handle.get_total_candidates(), 2);
    assert_eq!(handle.announce_winner().unwrap(), bob);
    assert_eq!(handle.balance_of(), 0);
    assert_eq!(handle.token_balance(config.deployer).unwrap(), Some(1200));
}

#[test]
fn test_unknown_call_is_rejected() {
    let mut txs_file = NamedTempFile::new().unwrap();
    txs_file
        .write_all(
            br#"[{ "sender": "sov1pv9skzctpv9skzctpv9skzctpv9skzctpv9skzctpv9skzctpv9stup8tx",
                   "call": { "election": "dissolve" } }]"#,
        )
        .unwrap();

    assert!(read_txs(txs_file.path()).is_err());
}
