use crate::types::*;

/// Governance-fixed release curve: one weight per interval, expressed
/// in basis points of the pool that is still unallocated when the
/// interval is processed.
///
/// Because every weight applies to the shrinking remainder, the table
/// does not sum to 10,000 bps. The reference deployment front-loads
/// adoption (4%, 8%, 10%, 12%) and then releases a flat 15% of the
/// remainder per interval, which yields a geometric long tail.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AllocationCurve {
    weights_bps: Vec<u32>,
}

impl AllocationCurve {
    /// Build a curve from a per-interval weight table. Every entry must
    /// be in `1..=10_000` bps.
    pub fn new(weights_bps: Vec<u32>) -> Result<Self, ScheduleError> {
        if weights_bps.is_empty() {
            return Err(ScheduleError::EmptyCurve);
        }
        for (index, &weight_bps) in weights_bps.iter().enumerate() {
            if weight_bps == 0 || weight_bps > BPS_DENOMINATOR as u32 {
                return Err(ScheduleError::InvalidWeight {
                    index: index as u32,
                    weight_bps,
                });
            }
        }
        Ok(Self { weights_bps })
    }

    /// The weight for the given interval, in basis points.
    pub fn weight_bps(&self, index: u32) -> Result<u32, ScheduleError> {
        self.weights_bps
            .get(index as usize)
            .copied()
            .ok_or(ScheduleError::IntervalOutOfBounds {
                index,
                interval_count: self.weights_bps.len() as u32,
            })
    }

    /// The amount released for `index` out of a remaining unallocated
    /// balance. Integer bps math, rounded down.
    pub fn allocation_for(
        &self,
        index: u32,
        remaining: TokenAmount,
    ) -> Result<TokenAmount, ScheduleError> {
        let weight = self.weight_bps(index)? as u128;
        Ok(remaining * weight / BPS_DENOMINATOR)
    }

    pub fn len(&self) -> u32 {
        self.weights_bps.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.weights_bps.is_empty()
    }

    pub fn weights(&self) -> &[u32] {
        &self.weights_bps
    }
}
