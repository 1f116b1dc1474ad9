use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MILLIS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Visible `[start, end]` interval in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn center(self) -> f64 {
        (self.start + self.end) / 2.0
    }

    #[must_use]
    pub fn contains(self, instant: f64) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Returns `true` when either window has an endpoint inside the other.
    #[must_use]
    pub fn overlaps(self, other: TimeWindow) -> bool {
        self.contains(other.start)
            || self.contains(other.end)
            || other.contains(self.start)
            || other.contains(self.end)
    }

    #[must_use]
    pub fn translated(self, delta: f64) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    #[must_use]
    pub fn start_datetime(self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.start)
    }

    #[must_use]
    pub fn end_datetime(self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.end)
    }
}

/// Pixel size of the widget's center panel.
///
/// Zero sizes are allowed; conversions fall back to the identity mapping.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[must_use]
pub fn millis_to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis.round() as i64)
}

#[must_use]
pub fn datetime_to_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}
