pub mod calendar;
pub mod curve;
pub mod types;

pub use calendar::IntervalCalendar;
pub use curve::AllocationCurve;
pub use types::*;
