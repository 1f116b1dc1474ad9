use tracing::trace;

use crate::core::{Clock, TimeWindow};
use crate::error::RangeResult;
use crate::interaction::{GestureEvent, InputEvent};

use super::RangeController;

impl<C: Clock> RangeController<C> {
    /// Contact start of a touch or pointer gesture.
    ///
    /// Captures the current window as the gesture reference and re-enables
    /// dragging for the new gesture.
    pub fn touch(&mut self, _event: GestureEvent) {
        self.interaction.on_touch(self.window);
        trace!(start = self.window.start, end = self.window.end, "gesture touch");
    }

    /// Starts a pan when the widget is moveable, the pointer is inside the
    /// window and the current gesture still allows dragging. Stops live mode.
    pub fn drag_start(&mut self, event: GestureEvent) {
        self.interaction.reset_drag_corrections();
        if !self.options.moveable
            || !self.is_inside_range(event.center_x, event.center_y)
            || !self.interaction.allow_dragging()
        {
            return;
        }
        self.stop_rolling();
        self.interaction.on_drag_start(self.window);
        trace!("drag started");
    }

    /// Translates the gesture reference window by the pointer delta.
    ///
    /// Each bound is moved clear of hidden intervals. When that moves either
    /// bound the snapped window becomes the new reference and the delta
    /// consumed so far is remembered; the translation is then recomputed
    /// once. Emits `rangechange` followed by `panmove`.
    pub fn drag(&mut self, event: GestureEvent) -> RangeResult<()> {
        if !self.interaction.dragging()
            || !self.options.moveable
            || !self.interaction.allow_dragging()
        {
            return Ok(());
        }

        let axis = self.axis_mapping();
        let raw_delta = axis.pick(event.delta_x, event.delta_y);
        let extent = axis.extent(self.viewport);
        let hidden = self
            .hidden_dates
            .hidden_duration_between(self.window.start, self.window.end);

        let mut corrected = false;
        let (candidate, delta) = loop {
            let Some(reference) = self.interaction.touch_window() else {
                return Ok(());
            };
            let delta = raw_delta - self.interaction.delta_difference();
            let visible_interval = reference.span() - hidden;
            let diff = if extent == 0.0 {
                0.0
            } else {
                axis.delta_to_time(delta, extent, visible_interval)
            };
            let candidate = reference.translated(diff);

            let hint = self.interaction.previous_delta() - delta;
            let safe = TimeWindow::new(
                self.hidden_dates
                    .snap_away_from_hidden(candidate.start, hint, true),
                self.hidden_dates
                    .snap_away_from_hidden(candidate.end, hint, true),
            );
            if corrected || safe == candidate {
                break (candidate, delta);
            }
            trace!(
                start = safe.start,
                end = safe.end,
                "drag snapped out of hidden interval"
            );
            self.interaction.on_drag_snapped(delta, safe);
            corrected = true;
        };

        self.interaction.on_drag_applied(delta);
        self.apply_range(Some(candidate.start), Some(candidate.end))?;
        self.refresh_hidden_dates();

        let change = self.change_payload(true, Some(InputEvent::Gesture(event)));
        self.emit_range_change(change);
        self.emit_pan_move();
        Ok(())
    }

    /// Ends the pan and emits `rangechanged`, whether or not the window moved.
    pub fn drag_end(&mut self, event: GestureEvent) {
        if !self.interaction.dragging()
            || !self.options.moveable
            || !self.interaction.allow_dragging()
        {
            return;
        }
        self.interaction.on_drag_end();
        trace!("drag ended");
        let change = self.change_payload(true, Some(InputEvent::Gesture(event)));
        self.emit_range_changed(change);
    }

    /// Contact release; clears the pinch anchor of the finished gesture.
    pub fn release(&mut self) {
        self.interaction.on_release();
    }
}
