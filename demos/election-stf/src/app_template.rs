use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use sov_modules_api::{Context, DispatchCall, Event, Genesis, Spec, Storage, WorkingSet};
use sov_state::StateCheckpoint;
use tracing::{debug, info, warn};

/// The outcome of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxEffect {
    Successful,
    /// The transaction left the state untouched, the string describes why.
    Reverted(String),
}

/// What a transaction leaves behind once it was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Events emitted by the transaction. Always empty for reverted transactions.
    pub events: Vec<Event>,
    pub effect: TxEffect,
    /// The state root after the transaction.
    pub state_root: [u8; 32],
}

impl TxReceipt {
    /// Returns `true` if the transaction was committed.
    pub fn is_successful(&self) -> bool {
        self.effect == TxEffect::Successful
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TxError {
    /// A module rejected the transaction, nothing was committed.
    #[error("Transaction reverted: {reason}")]
    Reverted {
        reason: String,
        error: anyhow::Error,
    },
    #[error("Failed to decode the call message: {0}")]
    Decode(#[from] std::io::Error),
    #[error("Failed to commit the transaction: {0}")]
    Commit(anyhow::Error),
    #[error("Failed to read the state: {0}")]
    Query(anyhow::Error),
}

impl TxError {
    /// The error a module reverted the transaction with, if it has type `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        match self {
            TxError::Reverted { error, .. } => error.downcast_ref::<E>(),
            TxError::Query(error) => error.downcast_ref::<E>(),
            TxError::Decode(_) | TxError::Commit(_) => None,
        }
    }
}

/// Applies transactions of a runtime `RT` on top of a storage.
///
/// Transactions are serialized: each one runs in a fresh [`WorkingSet`] and is
/// either committed as a whole or discarded as a whole before the next one starts.
/// Reads go straight to the committed state and never wait for writers.
pub struct AppTemplate<C: Context, RT> {
    pub current_storage: C::Storage,
    pub runtime: RT,
    writer: Mutex<()>,
}

impl<C: Context, RT> AppTemplate<C, RT>
where
    RT: DispatchCall<Context = C> + Genesis<Context = C>,
{
    pub fn new(storage: C::Storage, runtime: RT) -> Self {
        Self {
            current_storage: storage,
            runtime,
            writer: Mutex::new(()),
        }
    }

    /// Runs the genesis of every module of the runtime and commits the result.
    pub fn init_chain(&self, config: &<RT as Genesis>::Config) -> anyhow::Result<[u8; 32]> {
        let _writer = self.lock_writer();
        anyhow::ensure!(
            self.current_storage.is_empty(),
            "Genesis can only be applied to an empty storage"
        );

        let mut working_set = StateCheckpoint::new(self.current_storage.clone()).to_revertable();
        self.runtime.genesis(config, &mut working_set)?;

        let mut checkpoint = working_set.checkpoint();
        let genesis_root = self.current_storage.validate_and_commit(checkpoint.freeze())?;
        info!(genesis_root = hex::encode(genesis_root), "Genesis applied");
        Ok(genesis_root)
    }

    /// Decodes and applies a serialized call message.
    pub fn apply_raw_tx(&self, sender: C::Address, raw_call: &[u8]) -> Result<TxReceipt, TxError> {
        let call = RT::decode_call(raw_call)?;
        self.apply_tx(sender, call)
    }

    /// Applies a call message sent by `sender`. A module error doesn't fail
    /// this method, it ends up in the receipt as [`TxEffect::Reverted`].
    pub fn apply_tx(&self, sender: C::Address, call: RT::Decodable) -> Result<TxReceipt, TxError> {
        self.execute(sender, call).map(|(receipt, _)| receipt)
    }

    pub(crate) fn execute(
        &self,
        sender: C::Address,
        call: RT::Decodable,
    ) -> Result<(TxReceipt, Option<anyhow::Error>), TxError> {
        let _writer = self.lock_writer();

        debug!(%sender, ?call, "Applying transaction");
        let context = C::new(sender);
        let mut working_set = WorkingSet::new(self.current_storage.clone());

        match self.runtime.dispatch_call(call, &mut working_set, &context) {
            Ok(_) => {
                let events = working_set.take_events();
                let mut checkpoint = working_set.checkpoint();
                let state_root = self
                    .current_storage
                    .validate_and_commit(checkpoint.freeze())
                    .map_err(TxError::Commit)?;

                debug!(
                    events = events.len(),
                    state_root = hex::encode(state_root),
                    "Transaction committed"
                );
                let receipt = TxReceipt {
                    events,
                    effect: TxEffect::Successful,
                    state_root,
                };
                Ok((receipt, None))
            }
            Err(sov_modules_api::Error::ModuleError(error)) => {
                drop(working_set);
                let reason = format!("{error:#}");
                warn!(sender = %context.sender(), %reason, "Transaction reverted");

                let receipt = TxReceipt {
                    events: Vec::new(),
                    effect: TxEffect::Reverted(reason),
                    state_root: self.current_storage.get_state_root(),
                };
                Ok((receipt, Some(error)))
            }
        }
    }

    /// A working set over the committed state. Anything written to it is never committed.
    pub fn query_working_set(&self) -> WorkingSet<<C as Spec>::Storage> {
        WorkingSet::new(self.current_storage.clone())
    }

    pub fn state_root(&self) -> [u8; 32] {
        self.current_storage.get_state_root()
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        // Uncommitted writes die with the panicking transaction, so the storage is still consistent.
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
