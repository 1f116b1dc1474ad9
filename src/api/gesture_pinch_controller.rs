use tracing::trace;

use crate::core::{Clock, FrontBias, TimeWindow};
use crate::error::RangeResult;
use crate::interaction::{InputEvent, PinchEvent};

use super::zoom_target_resolver::{ZoomTargetInput, resolve_zoom_target};
use super::{RangeController, RangeRequest};

impl<C: Clock> RangeController<C> {
    /// Applies one pinch update relative to the gesture reference window.
    ///
    /// The first update anchors the pinch center and leaves live mode.
    /// Dragging stays disabled until the next touch. A pinch that would snap
    /// into a hidden interval rebases the gesture on the snapped window so the
    /// correction is applied once.
    pub fn pinch(&mut self, event: PinchEvent) -> RangeResult<()> {
        if !(self.options.zoomable && self.options.moveable) {
            return Ok(());
        }
        if self.interaction.touch_window().is_none() {
            self.interaction.on_touch(self.window);
        }
        self.interaction.disallow_dragging();

        let center_date = match self.interaction.pinch_center_date() {
            Some(date) => date,
            None => {
                let date = self.pointer_to_date(event.center_x, event.center_y);
                self.interaction
                    .on_pinch_anchor((event.center_x, event.center_y), date);
                self.stop_rolling();
                date
            }
        };

        let divisor = event.scale + self.interaction.scale_offset();
        if !divisor.is_finite() || divisor <= 0.0 {
            trace!(scale = event.scale, "degenerate pinch scale ignored");
            return Ok(());
        }
        let scale = 1.0 / divisor;

        let Some(reference) = self.interaction.touch_window() else {
            return Ok(());
        };
        let hidden_duration = self
            .hidden_dates
            .hidden_duration_between(self.window.start, self.window.end);
        let hidden_before = self
            .hidden_dates
            .hidden_duration_before(self.window, center_date);
        let target = resolve_zoom_target(ZoomTargetInput {
            reference,
            center: center_date,
            scale,
            hidden_duration,
            hidden_before,
        });

        self.front_bias = FrontBias {
            start_to_front: 1.0 - scale <= 0.0,
            end_to_front: scale - 1.0 <= 0.0,
        };
        let safe = TimeWindow::new(
            self.hidden_dates
                .snap_away_from_hidden(target.start, 1.0 - scale, true),
            self.hidden_dates
                .snap_away_from_hidden(target.end, scale - 1.0, true),
        );
        if safe != target {
            self.interaction.on_pinch_snapped(safe, event.scale);
        }

        let result = self.set_range(
            Some(safe.start),
            Some(safe.end),
            RangeRequest::from_user(Some(InputEvent::Pinch(event))),
        );
        self.front_bias = FrontBias::default();
        result
    }
}
