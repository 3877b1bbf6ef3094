use std::collections::HashMap;

use keepnet_keeps::{KeepDirectory, KeepId, KeepStatus};
use keepnet_schedule::{AllocationCurve, IntervalCalendar, ScheduleError, Timestamp, TokenAmount};

use crate::token::TokenLedger;
use crate::types::*;

/// The reward allocation and distribution ledger.
///
/// Owns the funded pool and three pieces of state: per-interval frozen
/// allocations, per-keep resolved shares, and the running
/// unallocated/distributed balances. Every operation either fully
/// applies or is rejected with a typed error; the `&mut self`
/// discipline makes each call atomic with respect to all ledger state.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RewardsLedger {
    calendar: IntervalCalendar,
    curve: AllocationCurve,
    minimum_keep_count: u64,

    funded: bool,
    /// Pool balance recorded at funding time. Never changes afterwards.
    funded_total: TokenAmount,
    /// Funded tokens not yet carved out for any frozen interval.
    unallocated: TokenAmount,
    /// Sum of per-keep shares paid out so far.
    distributed: TokenAmount,

    /// Frozen interval totals. Presence in the map is the freeze flag.
    allocations: HashMap<u32, IntervalAllocation>,
    /// Terminal per-keep outcomes. Presence is the resolved flag that
    /// makes payout and reclaim mutually exclusive.
    resolutions: HashMap<KeepId, ResolvedShare>,
}

impl RewardsLedger {
    /// Create an unfunded ledger. The curve must cover exactly the
    /// calendar's interval count and the minimum keep count must be
    /// non-zero.
    pub fn new(
        calendar: IntervalCalendar,
        curve: AllocationCurve,
        minimum_keep_count: u64,
    ) -> Result<Self, RewardsError> {
        if curve.len() != calendar.interval_count() {
            return Err(ScheduleError::CurveLengthMismatch {
                curve_len: curve.len(),
                interval_count: calendar.interval_count(),
            }
            .into());
        }
        if minimum_keep_count == 0 {
            return Err(RewardsError::ZeroMinimumKeepCount);
        }
        Ok(Self {
            calendar,
            curve,
            minimum_keep_count,
            funded: false,
            funded_total: 0,
            unallocated: 0,
            distributed: 0,
            allocations: HashMap::new(),
            resolutions: HashMap::new(),
        })
    }

    /// One-time funding notification: record the pool balance the
    /// schedule will release.
    pub fn mark_as_funded(&mut self, pool_balance: TokenAmount) -> Result<(), RewardsError> {
        if self.funded {
            return Err(RewardsError::AlreadyFunded);
        }
        self.funded = true;
        self.funded_total = pool_balance;
        self.unallocated = pool_balance;
        tracing::info!(pool_balance, "rewards ledger funded");
        Ok(())
    }

    /// Freeze the totals for an elapsed interval.
    ///
    /// The released amount is the curve weight applied to the pool
    /// that is unallocated at this moment, so residue from skipped or
    /// under-subscribed earlier intervals flows into later releases.
    /// A second call for the same interval is rejected with
    /// `IntervalAlreadyAllocated` and has no side effect.
    pub fn allocate_rewards(
        &mut self,
        interval: u32,
        now: Timestamp,
        directory: &KeepDirectory,
    ) -> Result<TokenAmount, RewardsError> {
        if !self.funded {
            return Err(RewardsError::NotFunded);
        }

        let end = self.calendar.end_of(interval)?;
        if now < end {
            return Err(RewardsError::IntervalNotYetElapsed { interval, end, now });
        }
        if self.allocations.contains_key(&interval) {
            return Err(RewardsError::IntervalAlreadyAllocated(interval));
        }

        let start = self.calendar.start_of(interval)?;
        let created = directory.count_created_in_range(start, end);
        let eligible_keep_count = created.max(self.minimum_keep_count);

        let total_allocated = self.curve.allocation_for(interval, self.unallocated)?;
        self.unallocated -= total_allocated;
        self.allocations.insert(
            interval,
            IntervalAllocation {
                total_allocated,
                eligible_keep_count,
            },
        );

        tracing::info!(
            interval,
            total_allocated,
            keeps_created = created,
            eligible_keep_count,
            unallocated = self.unallocated,
            "interval allocation frozen"
        );
        Ok(total_allocated)
    }

    /// Total frozen for an interval, zero if it has not been processed.
    pub fn allocated_rewards(&self, interval: u32) -> TokenAmount {
        self.allocations
            .get(&interval)
            .map(|a| a.total_allocated)
            .unwrap_or(0)
    }

    /// The frozen record for an interval, if any.
    pub fn interval_allocation(&self, interval: u32) -> Option<&IntervalAllocation> {
        self.allocations.get(&interval)
    }

    /// True iff the keep could successfully claim right now: closed,
    /// recognized, its interval frozen, and not yet resolved.
    pub fn eligible_for_reward(&self, keep_id: &KeepId, directory: &KeepDirectory) -> bool {
        let Ok(keep) = directory.keep(keep_id) else {
            return false;
        };
        if keep.status != KeepStatus::Closed || !directory.is_recognized(keep_id) {
            return false;
        }
        if self.resolutions.contains_key(keep_id) {
            return false;
        }
        let Ok(interval) = self.calendar.interval_of(keep.creation_timestamp) else {
            return false;
        };
        self.allocations.contains_key(&interval)
    }

    /// Pay a closed keep's frozen share out to its member
    /// beneficiaries. Returns the per-keep share.
    ///
    /// Integer division dust stays behind: the interval-level
    /// remainder of `total / eligible_keep_count` never leaves the
    /// frozen bucket, and the member-level remainder of
    /// `share / member_count` is forfeited with the paid share.
    pub fn receive_reward(
        &mut self,
        keep_id: &KeepId,
        directory: &KeepDirectory,
        token: &mut TokenLedger,
    ) -> Result<TokenAmount, RewardsError> {
        let status = directory.status_of(keep_id)?;
        if status != KeepStatus::Closed {
            return Err(RewardsError::KeepNotClosed {
                id: *keep_id,
                status,
            });
        }

        let (interval, reward_for_keep) = self.resolvable_share(keep_id, directory)?;

        let members = directory.members_of(keep_id)?;
        let per_member = reward_for_keep / members.len() as u128;
        for member in members {
            token.credit(member.beneficiary, per_member);
        }

        self.distributed += reward_for_keep;
        self.resolutions.insert(
            *keep_id,
            ResolvedShare {
                resolution: KeepResolution::Paid,
                amount: reward_for_keep,
            },
        );

        tracing::info!(
            keep = %hex::encode(keep_id),
            interval,
            reward_for_keep,
            per_member,
            members = members.len(),
            "keep reward paid"
        );
        Ok(reward_for_keep)
    }

    /// Return a terminated keep's unclaimed share to the unallocated
    /// pool. Returns the reclaimed amount.
    pub fn report_termination(
        &mut self,
        keep_id: &KeepId,
        directory: &KeepDirectory,
    ) -> Result<TokenAmount, RewardsError> {
        let status = directory.status_of(keep_id)?;
        if status != KeepStatus::Terminated {
            return Err(RewardsError::KeepNotTerminated {
                id: *keep_id,
                status,
            });
        }

        let (interval, reward_for_keep) = self.resolvable_share(keep_id, directory)?;

        self.unallocated += reward_for_keep;
        self.resolutions.insert(
            *keep_id,
            ResolvedShare {
                resolution: KeepResolution::Reclaimed,
                amount: reward_for_keep,
            },
        );

        tracing::info!(
            keep = %hex::encode(keep_id),
            interval,
            reclaimed = reward_for_keep,
            unallocated = self.unallocated,
            "terminated keep share reclaimed"
        );
        Ok(reward_for_keep)
    }

    /// Shared guards for payout and reclaim: single resolved flag,
    /// sanctioned-application recognition, frozen interval. Returns
    /// the keep's interval and per-keep share.
    fn resolvable_share(
        &self,
        keep_id: &KeepId,
        directory: &KeepDirectory,
    ) -> Result<(u32, TokenAmount), RewardsError> {
        if let Some(resolved) = self.resolutions.get(keep_id) {
            return Err(RewardsError::AlreadyResolved {
                id: *keep_id,
                resolution: resolved.resolution,
            });
        }
        if !directory.is_recognized(keep_id) {
            return Err(RewardsError::KeepNotRecognized(*keep_id));
        }

        let creation_timestamp = directory.creation_timestamp_of(keep_id)?;
        let interval = self.calendar.interval_of(creation_timestamp)?;
        let allocation = self
            .allocations
            .get(&interval)
            .ok_or(RewardsError::IntervalNotAllocated(interval))?;

        let reward_for_keep = allocation.total_allocated / allocation.eligible_keep_count as u128;
        Ok((interval, reward_for_keep))
    }

    /// Funded tokens not yet carved out for any frozen interval.
    pub fn unallocated_rewards(&self) -> TokenAmount {
        self.unallocated
    }

    /// Sum of per-keep shares paid out so far.
    pub fn distributed_rewards(&self) -> TokenAmount {
        self.distributed
    }

    pub fn funded_total(&self) -> TokenAmount {
        self.funded_total
    }

    pub fn is_funded(&self) -> bool {
        self.funded
    }

    /// The resolved outcome for a keep, if any.
    pub fn resolution_of(&self, keep_id: &KeepId) -> Option<&ResolvedShare> {
        self.resolutions.get(keep_id)
    }

    /// When the given interval ends, for callers timing their
    /// allocation calls.
    pub fn end_of(&self, interval: u32) -> Result<Timestamp, RewardsError> {
        Ok(self.calendar.end_of(interval)?)
    }

    pub fn calendar(&self) -> &IntervalCalendar {
        &self.calendar
    }

    pub fn curve(&self) -> &AllocationCurve {
        &self.curve
    }

    pub fn minimum_keep_count(&self) -> u64 {
        self.minimum_keep_count
    }
}
