use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};

/// A half-open reservation interval `[start, end)`.
///
/// Construction rejects `end <= start`; reversed input is an error, never
/// silently swapped. Two slots sharing an endpoint do not overlap, so
/// back-to-back bookings are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSlot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if end <= start {
            return Err(AppError::InvalidTimeRange(format!(
                "end_time ({end}) must be after start_time ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Duration in fractional hours, used for the price snapshot.
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 3600.0
    }
}
