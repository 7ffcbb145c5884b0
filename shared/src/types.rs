//! Common types used across the platform

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Inclusive timestamp range; an open end is unbounded
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimestampRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl TimestampRange {
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }

    /// The `days` leading up to and including `now`.
    ///
    /// A window reaching past the earliest representable date has no start.
    pub fn trailing_days(now: NaiveDateTime, days: u32) -> Self {
        Self {
            start: now.checked_sub_signed(Duration::days(i64::from(days))),
            end: Some(now),
        }
    }

    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        self.start.map_or(true, |start| *ts >= start) && self.end.map_or(true, |end| *ts <= end)
    }
}
