use error_stack::Report;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use vodca::References;

use crate::KernelError;

/// Half-open stay range `[start, end)`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, References)]
pub struct BookingPeriod {
    start: OffsetDateTime,
    end: OffsetDateTime,
}

impl BookingPeriod {
    pub fn new(
        start: impl Into<OffsetDateTime>,
        end: impl Into<OffsetDateTime>,
    ) -> error_stack::Result<Self, KernelError> {
        let start = start.into();
        let end = end.into();
        if end <= start {
            return Err(Report::new(KernelError::InvalidBookingRange)
                .attach_printable(format!("start: {start}, end: {end}")));
        }
        Ok(Self { start, end })
    }

    /// Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &BookingPeriod) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Any partial day counts as a full night.
    pub fn nights(&self) -> i64 {
        let span = (self.end - self.start).whole_nanoseconds();
        let day = Duration::DAY.whole_nanoseconds();
        let nights = (span + day - 1) / day;
        i64::try_from(nights).unwrap_or(i64::MAX)
    }
}
