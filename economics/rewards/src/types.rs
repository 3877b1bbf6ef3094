use serde::{Deserialize, Serialize};

use keepnet_keeps::{KeepError, KeepId, KeepStatus};
use keepnet_schedule::{ScheduleError, Timestamp, TokenAmount};

/// Totals frozen for one interval the first time it is processed.
///
/// Once recorded, both fields are immutable for the lifetime of the
/// ledger. Later terminations return shares to the unallocated pool
/// but never re-open these totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalAllocation {
    /// Tokens carved out of the unallocated pool for this interval.
    pub total_allocated: TokenAmount,
    /// Divisor for per-keep shares: actual keeps created in the
    /// interval, floored at the configured minimum.
    pub eligible_keep_count: u64,
}

/// Terminal outcome of a keep's frozen share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeepResolution {
    /// The share was paid out to the keep's member beneficiaries.
    Paid,
    /// The keep was terminated and its share returned to the
    /// unallocated pool.
    Reclaimed,
}

/// A keep's resolved share. One record per keep, written exactly once;
/// its existence is the guard against double payout or double reclaim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedShare {
    pub resolution: KeepResolution,
    /// The per-keep share that was paid or reclaimed.
    pub amount: TokenAmount,
}

/// Errors that can occur during reward ledger operations.
///
/// Every variant is a caller precondition violation. None of them
/// leaves partial state behind and none is fatal to the ledger.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RewardsError {
    #[error("ledger has not been funded yet")]
    NotFunded,

    #[error("ledger was already funded")]
    AlreadyFunded,

    #[error("interval {interval} ends at {end}, current time is {now}")]
    IntervalNotYetElapsed {
        interval: u32,
        end: Timestamp,
        now: Timestamp,
    },

    #[error("interval {0} was already allocated")]
    IntervalAlreadyAllocated(u32),

    #[error("interval {0} has not been allocated yet")]
    IntervalNotAllocated(u32),

    #[error("keep {} is not closed, status is {status:?}", hex::encode(.id))]
    KeepNotClosed { id: KeepId, status: KeepStatus },

    #[error("keep {} is not terminated, status is {status:?}", hex::encode(.id))]
    KeepNotTerminated { id: KeepId, status: KeepStatus },

    #[error("keep {} was not opened for the sanctioned application", hex::encode(.0))]
    KeepNotRecognized(KeepId),

    #[error("keep {} share was already resolved as {resolution:?}", hex::encode(.id))]
    AlreadyResolved {
        id: KeepId,
        resolution: KeepResolution,
    },

    #[error("minimum keep count must be greater than zero")]
    ZeroMinimumKeepCount,

    #[error(transparent)]
    Keep(#[from] KeepError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}
