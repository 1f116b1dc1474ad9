use serde::{Deserialize, Serialize};

use crate::core::TimeWindow;

/// Direction hints published while zooming so periodic hidden-date tables can
/// resolve which side of a hidden zone each bound belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontBias {
    pub start_to_front: bool,
    pub end_to_front: bool,
}

impl Default for FrontBias {
    fn default() -> Self {
        Self {
            start_to_front: false,
            end_to_front: true,
        }
    }
}

/// Hidden-interval bookkeeping consumed by the range controller.
///
/// The controller never stores hidden intervals itself: it asks the
/// implementation for durations and snapping, and requests a cache refresh
/// after every applied window.
pub trait HiddenDates {
    /// Refreshes cached hidden breakpoints for the newly applied window.
    fn update_hidden_dates(&mut self, window: TimeWindow, bias: FrontBias);

    /// Total hidden milliseconds between `start` and `end`.
    fn hidden_duration_between(&self, start: f64, end: f64) -> f64;

    /// Hidden milliseconds inside `window` that lie before `instant`.
    fn hidden_duration_before(&self, window: TimeWindow, instant: f64) -> f64;

    /// Hidden milliseconds skipped while walking `visible_duration` of visible
    /// time forward from `window.start`.
    fn accumulated_hidden_duration(&self, window: TimeWindow, visible_duration: f64) -> f64;

    /// Moves `candidate` out of a hidden interval, towards the end of the
    /// interval for a non-negative `direction` and towards its start otherwise.
    ///
    /// `correction_enabled` pushes the result one extra millisecond clear of
    /// the interval edge.
    fn snap_away_from_hidden(&self, candidate: f64, direction: f64, correction_enabled: bool)
    -> f64;

    fn has_hidden_dates(&self) -> bool;
}

/// Hidden-date implementation for timelines without hidden intervals.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHiddenDates;

impl HiddenDates for NoHiddenDates {
    fn update_hidden_dates(&mut self, _window: TimeWindow, _bias: FrontBias) {}

    fn hidden_duration_between(&self, _start: f64, _end: f64) -> f64 {
        0.0
    }

    fn hidden_duration_before(&self, _window: TimeWindow, _instant: f64) -> f64 {
        0.0
    }

    fn accumulated_hidden_duration(&self, _window: TimeWindow, _visible_duration: f64) -> f64 {
        0.0
    }

    fn snap_away_from_hidden(
        &self,
        candidate: f64,
        _direction: f64,
        _correction_enabled: bool,
    ) -> f64 {
        candidate
    }

    fn has_hidden_dates(&self) -> bool {
        false
    }
}

/// Half-open hidden interval `[start, end)` in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HiddenInterval {
    pub start: f64,
    pub end: f64,
}

impl HiddenInterval {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    fn overlap(self, start: f64, end: f64) -> f64 {
        (self.end.min(end) - self.start.max(start)).max(0.0)
    }
}

/// Fixed list of non-repeating hidden intervals.
///
/// Intervals are sorted and merged on construction, so lookups can walk them
/// in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticHiddenIntervals {
    intervals: Vec<HiddenInterval>,
    last_window: Option<TimeWindow>,
}

impl StaticHiddenIntervals {
    #[must_use]
    pub fn new(intervals: impl IntoIterator<Item = HiddenInterval>) -> Self {
        let mut sorted: Vec<HiddenInterval> = intervals
            .into_iter()
            .filter(|interval| {
                interval.start.is_finite() && interval.end.is_finite() && interval.end > interval.start
            })
            .collect();
        sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

        let mut merged: Vec<HiddenInterval> = Vec::with_capacity(sorted.len());
        for interval in sorted {
            match merged.last_mut() {
                Some(last) if interval.start <= last.end => last.end = last.end.max(interval.end),
                _ => merged.push(interval),
            }
        }

        Self {
            intervals: merged,
            last_window: None,
        }
    }

    #[must_use]
    pub fn intervals(&self) -> &[HiddenInterval] {
        &self.intervals
    }

    /// Window passed to the most recent cache refresh.
    #[must_use]
    pub fn last_window(&self) -> Option<TimeWindow> {
        self.last_window
    }

    fn containing(&self, instant: f64) -> Option<HiddenInterval> {
        self.intervals
            .iter()
            .copied()
            .find(|interval| instant >= interval.start && instant < interval.end)
    }
}

impl HiddenDates for StaticHiddenIntervals {
    fn update_hidden_dates(&mut self, window: TimeWindow, _bias: FrontBias) {
        self.last_window = Some(window);
    }

    fn hidden_duration_between(&self, start: f64, end: f64) -> f64 {
        self.intervals
            .iter()
            .map(|interval| interval.overlap(start, end))
            .sum()
    }

    fn hidden_duration_before(&self, window: TimeWindow, instant: f64) -> f64 {
        self.hidden_duration_between(window.start, instant.min(window.end))
    }

    fn accumulated_hidden_duration(&self, window: TimeWindow, visible_duration: f64) -> f64 {
        let mut hidden = 0.0;
        let mut visible = 0.0;
        let mut cursor = window.start;
        for interval in &self.intervals {
            if interval.end <= window.start || interval.start >= window.end {
                continue;
            }
            let hidden_start = interval.start.max(window.start);
            visible += hidden_start - cursor;
            if visible >= visible_duration {
                break;
            }
            let hidden_end = interval.end.min(window.end);
            hidden += hidden_end - hidden_start;
            cursor = hidden_end;
        }
        hidden
    }

    fn snap_away_from_hidden(
        &self,
        candidate: f64,
        direction: f64,
        correction_enabled: bool,
    ) -> f64 {
        let Some(interval) = self.containing(candidate) else {
            return candidate;
        };
        let correction = if correction_enabled { 1.0 } else { 0.0 };
        if direction < 0.0 {
            interval.start - correction
        } else {
            interval.end + correction
        }
    }

    fn has_hidden_dates(&self) -> bool {
        !self.intervals.is_empty()
    }
}
