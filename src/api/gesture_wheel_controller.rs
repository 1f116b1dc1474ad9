use tracing::trace;

use crate::core::Clock;
use crate::error::RangeResult;
use crate::interaction::{InputEvent, WheelEvent};

use super::RangeController;
use super::zoom_target_resolver::{resolve_wheel_zoom_scale, wheel_zoom_allowed};

impl<C: Clock> RangeController<C> {
    /// Zooms around the pointer (or the live-mode pivot) for one wheel step.
    ///
    /// Returns `true` when the event was consumed; the host must then
    /// suppress its native scrolling.
    pub fn wheel(&mut self, event: WheelEvent) -> RangeResult<bool> {
        let zoom_key = self.options.zoom_key;
        let zoom_key_held = zoom_key.is_some_and(|key| key.is_held(event.modifiers));
        if !wheel_zoom_allowed(
            zoom_key,
            zoom_key_held,
            self.options.moveable,
            self.options.zoomable,
        ) {
            return Ok(false);
        }
        if !self.is_inside_range(event.pointer_x, event.pointer_y) {
            return Ok(false);
        }

        let delta = event.normalized_delta();
        if delta == 0.0 {
            return Ok(false);
        }

        let scale = resolve_wheel_zoom_scale(delta, self.options.zoom_friction);
        let anchor = if self.rolling.active {
            self.window.start + self.window.span() * self.options.rolling_mode.offset
        } else {
            self.pointer_to_date(event.pointer_x, event.pointer_y)
        };
        trace!(delta, scale, anchor, "wheel zoom");
        self.zoom(scale, Some(anchor), delta, Some(InputEvent::Wheel(event)))?;
        Ok(true)
    }
}
