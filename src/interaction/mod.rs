use serde::{Deserialize, Serialize};

use crate::core::TimeWindow;

/// Keyboard modifiers held while an input event was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
}

/// Modifier that must be held for wheel zooming when configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZoomKey {
    #[serde(alias = "altKey")]
    Alt,
    #[serde(alias = "ctrlKey")]
    Ctrl,
    #[serde(alias = "shiftKey")]
    Shift,
    #[serde(alias = "metaKey")]
    Meta,
}

impl ZoomKey {
    #[must_use]
    pub fn is_held(self, modifiers: Modifiers) -> bool {
        match self {
            Self::Alt => modifiers.alt,
            Self::Ctrl => modifiers.ctrl,
            Self::Shift => modifiers.shift,
            Self::Meta => modifiers.meta,
        }
    }
}

/// Normalized pan/touch gesture sample.
///
/// Pointer coordinates are relative to the center panel; deltas are measured
/// from the gesture start.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GestureEvent {
    pub center_x: f64,
    pub center_y: f64,
    pub delta_x: f64,
    pub delta_y: f64,
}

impl GestureEvent {
    #[must_use]
    pub fn at(center_x: f64, center_y: f64) -> Self {
        Self {
            center_x,
            center_y,
            delta_x: 0.0,
            delta_y: 0.0,
        }
    }

    #[must_use]
    pub fn with_delta(mut self, delta_x: f64, delta_y: f64) -> Self {
        self.delta_x = delta_x;
        self.delta_y = delta_y;
        self
    }
}

/// Wheel sample carrying every delta flavor a host may deliver.
///
/// Zero means "not reported" for each delta field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelEvent {
    pub pointer_x: f64,
    pub pointer_y: f64,
    /// Legacy wheel delta in 120-unit notches, positive away from the user.
    pub wheel_delta: f64,
    /// Legacy line-based detail, positive towards the user.
    pub detail: f64,
    /// Standard pixel/line delta, positive towards the user.
    pub delta_y: f64,
    pub modifiers: Modifiers,
}

impl WheelEvent {
    #[must_use]
    pub fn at(pointer_x: f64, pointer_y: f64) -> Self {
        Self {
            pointer_x,
            pointer_y,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_delta_y(mut self, delta_y: f64) -> Self {
        self.delta_y = delta_y;
        self
    }

    #[must_use]
    pub fn with_wheel_delta(mut self, wheel_delta: f64) -> Self {
        self.wheel_delta = wheel_delta;
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Small signed scroll amount, positive when scrolling away from the user.
    #[must_use]
    pub fn normalized_delta(self) -> f64 {
        if self.wheel_delta != 0.0 {
            self.wheel_delta / 120.0
        } else if self.detail != 0.0 {
            -self.detail / 3.0
        } else if self.delta_y != 0.0 {
            -self.delta_y / 3.0
        } else {
            0.0
        }
    }
}

/// Pinch sample; `scale` is relative to the gesture start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinchEvent {
    pub center_x: f64,
    pub center_y: f64,
    pub scale: f64,
}

impl PinchEvent {
    #[must_use]
    pub fn new(center_x: f64, center_y: f64, scale: f64) -> Self {
        Self {
            center_x,
            center_y,
            scale,
        }
    }
}

/// Input that originated a range change, forwarded in event payloads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Gesture(GestureEvent),
    Wheel(WheelEvent),
    Pinch(PinchEvent),
}

/// Per-gesture scratch state.
///
/// Created by `on_touch`, cleared when the gesture ends.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    dragging: bool,
    allow_dragging: bool,
    touch_window: Option<TimeWindow>,
    pinch_center: Option<(f64, f64)>,
    pinch_center_date: Option<f64>,
    delta_difference: f64,
    previous_delta: f64,
    scale_offset: f64,
}

impl InteractionState {
    #[must_use]
    pub fn dragging(self) -> bool {
        self.dragging
    }

    #[must_use]
    pub fn allow_dragging(self) -> bool {
        self.allow_dragging
    }

    /// Window captured at gesture start, adjusted by hidden-zone corrections.
    #[must_use]
    pub fn touch_window(self) -> Option<TimeWindow> {
        self.touch_window
    }

    #[must_use]
    pub fn pinch_center(self) -> Option<(f64, f64)> {
        self.pinch_center
    }

    #[must_use]
    pub fn pinch_center_date(self) -> Option<f64> {
        self.pinch_center_date
    }

    #[must_use]
    pub fn delta_difference(self) -> f64 {
        self.delta_difference
    }

    #[must_use]
    pub fn previous_delta(self) -> f64 {
        self.previous_delta
    }

    #[must_use]
    pub fn scale_offset(self) -> f64 {
        self.scale_offset
    }

    /// Starts a new gesture. A drag left open by the previous gesture ends here.
    pub fn on_touch(&mut self, window: TimeWindow) {
        self.dragging = false;
        self.touch_window = Some(window);
        self.allow_dragging = true;
        self.pinch_center = None;
        self.pinch_center_date = None;
        self.scale_offset = 0.0;
        self.delta_difference = 0.0;
    }

    pub fn reset_drag_corrections(&mut self) {
        self.delta_difference = 0.0;
        self.previous_delta = 0.0;
    }

    pub fn on_drag_start(&mut self, window: TimeWindow) {
        self.touch_window = Some(window);
        self.dragging = true;
    }

    /// Records a hidden-zone correction: the snapped window becomes the new
    /// reference and the consumed delta is remembered.
    pub fn on_drag_snapped(&mut self, consumed_delta: f64, snapped: TimeWindow) {
        self.delta_difference += consumed_delta;
        self.touch_window = Some(snapped);
    }

    pub fn on_drag_applied(&mut self, delta: f64) {
        self.previous_delta = delta;
    }

    pub fn on_drag_end(&mut self) {
        self.dragging = false;
        self.touch_window = None;
        self.reset_drag_corrections();
    }

    pub fn on_pinch_anchor(&mut self, center: (f64, f64), center_date: f64) {
        self.allow_dragging = false;
        self.pinch_center = Some(center);
        self.pinch_center_date = Some(center_date);
    }

    /// Blocks dragging for the rest of the gesture and ends a drag in progress.
    pub fn disallow_dragging(&mut self) {
        self.allow_dragging = false;
        self.dragging = false;
    }

    pub fn on_pinch_snapped(&mut self, snapped: TimeWindow, event_scale: f64) {
        self.touch_window = Some(snapped);
        self.scale_offset = 1.0 - event_scale;
    }

    pub fn on_release(&mut self) {
        self.pinch_center = None;
        self.pinch_center_date = None;
        self.scale_offset = 0.0;
    }
}
