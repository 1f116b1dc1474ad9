use crate::core::TimeWindow;
use crate::interaction::ZoomKey;

use super::range_options::DEFAULT_ZOOM_FRICTION;

pub(super) struct ZoomTargetInput {
    /// Window the scale is applied to.
    pub(super) reference: TimeWindow,
    pub(super) center: f64,
    /// `> 1` zooms out, `< 1` zooms in.
    pub(super) scale: f64,
    /// Hidden milliseconds inside the current window.
    pub(super) hidden_duration: f64,
    /// Hidden milliseconds inside the current window before `center`.
    pub(super) hidden_before: f64,
}

/// Scales `reference` about `center`, keeping hidden time out of the lever arm.
pub(super) fn resolve_zoom_target(input: ZoomTargetInput) -> TimeWindow {
    let ZoomTargetInput {
        reference,
        center,
        scale,
        hidden_duration,
        hidden_before,
    } = input;

    let hidden_after = hidden_duration - hidden_before;
    let pivot_start = center - hidden_before;
    let pivot_end = center + hidden_after;
    TimeWindow::new(
        pivot_start + (reference.start - pivot_start) * scale,
        pivot_end + (reference.end - pivot_end) * scale,
    )
}

/// Maps a normalized wheel delta to a zoom scale.
///
/// Negative deltas (towards the user) zoom out. A non-positive or
/// non-finite friction falls back to the default.
pub(super) fn resolve_wheel_zoom_scale(delta: f64, zoom_friction: f64) -> f64 {
    let friction = if zoom_friction.is_finite() && zoom_friction > 0.0 {
        zoom_friction
    } else {
        DEFAULT_ZOOM_FRICTION
    };
    if delta < 0.0 {
        1.0 - delta / friction
    } else {
        1.0 / (1.0 + delta / friction)
    }
}

/// Wheel zooming is ignored when a zoom key is configured but not held, or
/// when the widget is not zoomable. Panning never takes over the wheel.
pub(super) fn wheel_zoom_allowed(
    zoom_key: Option<ZoomKey>,
    zoom_key_held: bool,
    moveable: bool,
    zoomable: bool,
) -> bool {
    if zoom_key.is_some() && !zoom_key_held && zoomable {
        return false;
    }
    moveable && zoomable
}

/// Percentage-based zoom-in target centered on the window.
pub(super) fn resolve_zoom_in_window(window: TimeWindow, percentage: f64) -> TimeWindow {
    let interval = window.span();
    let new_interval = interval / (1.0 + percentage);
    let distance = (interval - new_interval) / 2.0;
    TimeWindow::new(window.start + distance, window.end - distance)
}

/// Percentage-based zoom-out target centered on the window.
pub(super) fn resolve_zoom_out_window(window: TimeWindow, percentage: f64) -> TimeWindow {
    let extension = window.span() * percentage / 2.0;
    TimeWindow::new(window.start - extension, window.end + extension)
}
