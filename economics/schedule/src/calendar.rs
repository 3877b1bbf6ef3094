use crate::types::*;

/// Pure mapping between wall-clock time and reward interval indices.
///
/// The calendar is fixed at construction: a first interval start, a
/// uniform interval duration, and a total interval count beyond which
/// no rewards are ever released.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IntervalCalendar {
    first_interval_start: Timestamp,
    interval_duration: u64,
    interval_count: u32,
}

impl IntervalCalendar {
    /// Create a calendar. The duration must be non-zero and the
    /// schedule must contain at least one interval.
    pub fn new(
        first_interval_start: Timestamp,
        interval_duration: u64,
        interval_count: u32,
    ) -> Result<Self, ScheduleError> {
        if interval_duration == 0 {
            return Err(ScheduleError::ZeroIntervalDuration);
        }
        if interval_count == 0 {
            return Err(ScheduleError::IntervalOutOfBounds {
                index: 0,
                interval_count: 0,
            });
        }
        Ok(Self {
            first_interval_start,
            interval_duration,
            interval_count,
        })
    }

    /// The interval containing the given timestamp.
    ///
    /// Timestamps before the first interval start are rejected. The
    /// returned index is not clamped to the interval count; indices at
    /// or past the count belong to time after the schedule ends and
    /// are never allocatable.
    pub fn interval_of(&self, timestamp: Timestamp) -> Result<u32, ScheduleError> {
        if timestamp < self.first_interval_start {
            return Err(ScheduleError::OutOfRange {
                timestamp,
                first_interval_start: self.first_interval_start,
            });
        }
        Ok(((timestamp - self.first_interval_start) / self.interval_duration) as u32)
    }

    /// The timestamp at which the given interval begins (inclusive).
    pub fn start_of(&self, index: u32) -> Result<Timestamp, ScheduleError> {
        self.check_bounds(index)?;
        Ok(self.first_interval_start + index as u64 * self.interval_duration)
    }

    /// The timestamp at which the given interval ends (exclusive).
    pub fn end_of(&self, index: u32) -> Result<Timestamp, ScheduleError> {
        self.check_bounds(index)?;
        Ok(self.first_interval_start + (index as u64 + 1) * self.interval_duration)
    }

    /// True once the given interval has fully elapsed at `now`.
    pub fn has_elapsed(&self, index: u32, now: Timestamp) -> Result<bool, ScheduleError> {
        Ok(now >= self.end_of(index)?)
    }

    pub fn first_interval_start(&self) -> Timestamp {
        self.first_interval_start
    }

    pub fn interval_duration(&self) -> u64 {
        self.interval_duration
    }

    pub fn interval_count(&self) -> u32 {
        self.interval_count
    }

    fn check_bounds(&self, index: u32) -> Result<(), ScheduleError> {
        if index >= self.interval_count {
            return Err(ScheduleError::IntervalOutOfBounds {
                index,
                interval_count: self.interval_count,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: Timestamp = 1_600_041_600; // Sep 14 2020 00:00 UTC
    const THIRTY_DAYS: u64 = 30 * 24 * 60 * 60;

    fn calendar() -> IntervalCalendar {
        IntervalCalendar::new(START, THIRTY_DAYS, 24).unwrap()
    }

    #[test]
    fn zero_duration_rejected() {
        let result = IntervalCalendar::new(START, 0, 24);
        assert_eq!(result, Err(ScheduleError::ZeroIntervalDuration));
    }

    #[test]
    fn zero_interval_count_rejected() {
        let result = IntervalCalendar::new(START, THIRTY_DAYS, 0);
        assert!(matches!(
            result,
            Err(ScheduleError::IntervalOutOfBounds { .. })
        ));
    }

    #[test]
    fn interval_of_start_is_zero() {
        assert_eq!(calendar().interval_of(START).unwrap(), 0);
    }

    #[test]
    fn interval_of_before_start_fails() {
        let result = calendar().interval_of(START - 1);
        assert_eq!(
            result,
            Err(ScheduleError::OutOfRange {
                timestamp: START - 1,
                first_interval_start: START,
            })
        );
    }

    #[test]
    fn interval_of_boundaries() {
        let cal = calendar();
        assert_eq!(cal.interval_of(START + THIRTY_DAYS - 1).unwrap(), 0);
        assert_eq!(cal.interval_of(START + THIRTY_DAYS).unwrap(), 1);
        assert_eq!(cal.interval_of(START + 5 * THIRTY_DAYS + 17).unwrap(), 5);
    }

    #[test]
    fn interval_of_past_schedule_end_is_not_clamped() {
        let cal = calendar();
        let after_end = START + 30 * THIRTY_DAYS;
        assert_eq!(cal.interval_of(after_end).unwrap(), 30);
    }

    #[test]
    fn start_and_end_of() {
        let cal = calendar();
        assert_eq!(cal.start_of(0).unwrap(), START);
        assert_eq!(cal.end_of(0).unwrap(), START + THIRTY_DAYS);
        assert_eq!(cal.start_of(23).unwrap(), START + 23 * THIRTY_DAYS);
        assert_eq!(cal.end_of(23).unwrap(), START + 24 * THIRTY_DAYS);
    }

    #[test]
    fn end_of_out_of_bounds() {
        let result = calendar().end_of(24);
        assert_eq!(
            result,
            Err(ScheduleError::IntervalOutOfBounds {
                index: 24,
                interval_count: 24,
            })
        );
    }

    #[test]
    fn has_elapsed() {
        let cal = calendar();
        assert!(!cal.has_elapsed(0, START + THIRTY_DAYS - 1).unwrap());
        assert!(cal.has_elapsed(0, START + THIRTY_DAYS).unwrap());
        assert!(cal.has_elapsed(3, START + 24 * THIRTY_DAYS).unwrap());
    }
}
