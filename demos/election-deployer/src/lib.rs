use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use election_stf::{deploy_election, from_toml_path, DeployConfig, ElectionHandle, RuntimeCall, TxReceipt};
use serde::Deserialize;
use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::Address;
use tracing::{info, warn};

/// Deploys an election and optionally replays a list of transactions against it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the deployment config.
    #[arg(long, default_value = "deploy_config.toml")]
    pub config: PathBuf,

    /// Path to a JSON array of transactions to apply after deployment.
    #[arg(long)]
    pub txs: Option<PathBuf>,
}

/// A transaction read from the JSON script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptedTx {
    pub sender: Address,
    pub call: RuntimeCall<DefaultContext>,
}

pub fn deploy(config: &DeployConfig) -> anyhow::Result<ElectionHandle> {
    deploy_election(&config.election_name, config.deployer, config.setup())
}

pub fn read_txs(path: &Path) -> anyhow::Result<Vec<ScriptedTx>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transactions from {}", path.display()))?;
    Ok(serde_json::from_str(&contents)?)
}

/// Applies every transaction in order. Reverted transactions are reported and skipped.
pub fn replay(handle: &ElectionHandle, txs: Vec<ScriptedTx>) -> anyhow::Result<Vec<TxReceipt>> {
    let mut receipts = Vec::with_capacity(txs.len());
    for (index, tx) in txs.into_iter().enumerate() {
        let receipt = handle.app().apply_tx(tx.sender, tx.call)?;
        if receipt.is_successful() {
            info!(index, events = receipt.events.len(), "Transaction applied");
        } else {
            warn!(index, effect = ?receipt.effect, "Transaction reverted");
        }
        receipts.push(receipt);
    }
    Ok(receipts)
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let config: DeployConfig =
        from_toml_path(&args.config).context("Failed to read deployment configuration")?;
    let handle = deploy(&config)?;
    println!("Deployed at address {}", handle.address());

    if let Some(path) = args.txs {
        let receipts = replay(&handle, read_txs(&path)?)?;
        for receipt in &receipts {
            println!("{}", serde_json::to_string(receipt)?);
        }
        println!(
            "Election {:?} is {} with {} candidates and a balance of {}",
            handle.election_name()?,
            handle.state()?,
            handle.get_total_candidates(),
            handle.balance_of()
        );
    }

    Ok(())
}
