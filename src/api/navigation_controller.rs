use tracing::trace;

use crate::core::{Clock, FrontBias};
use crate::error::RangeResult;
use crate::interaction::InputEvent;

use super::zoom_target_resolver::{
    ZoomTargetInput, resolve_zoom_in_window, resolve_zoom_out_window, resolve_zoom_target,
};
use super::{RangeAnimation, RangeController, RangeRequest};

fn valid_zoom_percentage(percentage: f64) -> bool {
    percentage > 0.0 && percentage <= 1.0
}

impl<C: Clock> RangeController<C> {
    /// Zooms about `center` (window midpoint when `None`).
    ///
    /// `scale > 1` zooms out and `scale < 1` zooms in. Hidden time is kept out
    /// of the lever arm on both sides of the center. The sign of `delta`
    /// decides which way each bound is snapped out of hidden intervals. The
    /// result is applied as a user-initiated, non-animated range request.
    pub fn zoom(
        &mut self,
        scale: f64,
        center: Option<f64>,
        delta: f64,
        event: Option<InputEvent>,
    ) -> RangeResult<()> {
        let center = center.unwrap_or_else(|| self.window.center());
        let hidden_duration = self
            .hidden_dates
            .hidden_duration_between(self.window.start, self.window.end);
        let hidden_before = self.hidden_dates.hidden_duration_before(self.window, center);
        let target = resolve_zoom_target(ZoomTargetInput {
            reference: self.window,
            center,
            scale,
            hidden_duration,
            hidden_before,
        });

        self.front_bias = FrontBias {
            start_to_front: !(delta > 0.0),
            end_to_front: !(-delta > 0.0),
        };
        let safe_start = self
            .hidden_dates
            .snap_away_from_hidden(target.start, delta, true);
        let safe_end = self
            .hidden_dates
            .snap_away_from_hidden(target.end, -delta, true);
        trace!(scale, center, start = safe_start, end = safe_end, "zoom");

        let result = self.set_range(
            Some(safe_start),
            Some(safe_end),
            RangeRequest::from_user(event),
        );
        self.front_bias = FrontBias::default();
        result
    }

    /// Shifts the window by `delta` spans, e.g. `0.5` moves half a window
    /// forward.
    ///
    /// Writes the window directly: no constraints, no notifications.
    pub fn move_by(&mut self, delta: f64) {
        let shift = self.window.span() * delta;
        self.window = self.window.translated(shift);
        self.invalidate_ms_per_pixel();
    }

    /// Re-centers the window on `instant` through a user-initiated,
    /// non-animated range request.
    pub fn move_to(&mut self, instant: f64) -> RangeResult<()> {
        let diff = self.window.center() - instant;
        let target = self.window.translated(-diff);
        self.set_range(
            Some(target.start),
            Some(target.end),
            RangeRequest::from_user(None),
        )
    }

    /// Narrows the window around its center so the new span is
    /// `span / (1 + percentage)`. Percentages outside `(0, 1]` are ignored.
    pub fn zoom_in(&mut self, percentage: f64, request: RangeRequest) -> RangeResult<()> {
        if !valid_zoom_percentage(percentage) {
            return Ok(());
        }
        let target = resolve_zoom_in_window(self.window, percentage);
        self.set_range(Some(target.start), Some(target.end), request)
    }

    /// Widens the window by `span * percentage / 2` on each side.
    /// Percentages outside `(0, 1]` are ignored.
    pub fn zoom_out(&mut self, percentage: f64, request: RangeRequest) -> RangeResult<()> {
        if !valid_zoom_percentage(percentage) {
            return Ok(());
        }
        let target = resolve_zoom_out_window(self.window, percentage);
        self.set_range(Some(target.start), Some(target.end), request)
    }

    /// Programmatic window change, not attributed to the user.
    pub fn set_window(
        &mut self,
        start: f64,
        end: f64,
        animation: impl Into<RangeAnimation>,
    ) -> RangeResult<()> {
        self.set_range(Some(start), Some(end), RangeRequest::animated(animation))
    }
}
