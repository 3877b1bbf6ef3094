/// A point in time as unix seconds (UTC).
pub type Timestamp = u64;

/// A token amount in the smallest token unit.
///
/// Reward pools are denominated in 18-decimal units, so a realistic
/// funded total does not fit in a u64.
pub type TokenAmount = u128;

/// Basis points: 1 bps = 0.01%.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Errors that can occur when evaluating the release schedule.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("timestamp {timestamp} precedes the first interval start {first_interval_start}")]
    OutOfRange {
        timestamp: Timestamp,
        first_interval_start: Timestamp,
    },

    #[error("interval {index} is out of bounds, schedule has {interval_count} intervals")]
    IntervalOutOfBounds { index: u32, interval_count: u32 },

    #[error("interval duration must be greater than zero")]
    ZeroIntervalDuration,

    #[error("allocation curve must have at least one entry")]
    EmptyCurve,

    #[error("curve weight at index {index} is {weight_bps} bps, must be in 1..=10000")]
    InvalidWeight { index: u32, weight_bps: u32 },

    #[error("curve has {curve_len} entries but the calendar has {interval_count} intervals")]
    CurveLengthMismatch { curve_len: u32, interval_count: u32 },
}
