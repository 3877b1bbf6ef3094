use std::sync::Arc;

use parking_lot::Mutex;

use keepnet_keeps::{KeepDirectory, KeepId};
use keepnet_schedule::{Timestamp, TokenAmount};

use crate::ledger::RewardsLedger;
use crate::token::TokenLedger;
use crate::types::RewardsError;

/// Cloneable handle serializing all ledger calls behind one mutex.
///
/// The core ledger is single-owner `&mut self`; multi-threaded hosts
/// use this wrapper instead. One coarse lock covers every mutation of
/// pool balances, frozen allocations, and keep resolutions, so racing
/// callers observe exactly the rejection semantics of the sequential
/// ledger: one allocation per interval succeeds, one resolution per
/// keep succeeds, the losers get typed errors.
#[derive(Clone)]
pub struct SharedRewardsLedger {
    inner: Arc<Mutex<RewardsLedger>>,
}

impl SharedRewardsLedger {
    pub fn new(ledger: RewardsLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    pub fn mark_as_funded(&self, pool_balance: TokenAmount) -> Result<(), RewardsError> {
        self.inner.lock().mark_as_funded(pool_balance)
    }

    pub fn allocate_rewards(
        &self,
        interval: u32,
        now: Timestamp,
        directory: &KeepDirectory,
    ) -> Result<TokenAmount, RewardsError> {
        self.inner.lock().allocate_rewards(interval, now, directory)
    }

    pub fn allocated_rewards(&self, interval: u32) -> TokenAmount {
        self.inner.lock().allocated_rewards(interval)
    }

    pub fn eligible_for_reward(&self, keep_id: &KeepId, directory: &KeepDirectory) -> bool {
        self.inner.lock().eligible_for_reward(keep_id, directory)
    }

    pub fn receive_reward(
        &self,
        keep_id: &KeepId,
        directory: &KeepDirectory,
        token: &mut TokenLedger,
    ) -> Result<TokenAmount, RewardsError> {
        self.inner.lock().receive_reward(keep_id, directory, token)
    }

    pub fn report_termination(
        &self,
        keep_id: &KeepId,
        directory: &KeepDirectory,
    ) -> Result<TokenAmount, RewardsError> {
        self.inner.lock().report_termination(keep_id, directory)
    }

    pub fn unallocated_rewards(&self) -> TokenAmount {
        self.inner.lock().unallocated_rewards()
    }

    pub fn distributed_rewards(&self) -> TokenAmount {
        self.inner.lock().distributed_rewards()
    }

    pub fn end_of(&self, interval: u32) -> Result<Timestamp, RewardsError> {
        self.inner.lock().end_of(interval)
    }

    /// Run a closure under the ledger lock, for callers that need a
    /// multi-step read without interleaving.
    pub fn with<R>(&self, f: impl FnOnce(&RewardsLedger) -> R) -> R {
        f(&self.inner.lock())
    }
}
