use std::fmt;

use serde_json::Value;

use crate::core::{EasingFunction, TimeWindow, TimerHandle};
use crate::error::{RangeError, RangeResult};
use crate::interaction::InputEvent;

pub const DEFAULT_ANIMATION_DURATION_MS: f64 = 500.0;
/// Wall-clock gap between animation frames.
pub const ANIMATION_FRAME_INTERVAL_MS: f64 = 20.0;

/// Overrides for an animated range transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationOptions {
    pub duration_ms: Option<f64>,
    pub easing: Option<EasingFunction>,
}

impl AnimationOptions {
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    #[must_use]
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Selects an easing curve by its widget name, e.g. `"easeInOutCubic"`.
    pub fn with_easing_name(self, name: &str) -> RangeResult<Self> {
        Ok(self.with_easing(name.parse::<EasingFunction>()?))
    }
}

/// Animation request attached to a range change.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RangeAnimation {
    #[default]
    Disabled,
    /// Default duration and easing.
    Enabled,
    Custom(AnimationOptions),
}

impl From<bool> for RangeAnimation {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }
}

impl From<AnimationOptions> for RangeAnimation {
    fn from(options: AnimationOptions) -> Self {
        Self::Custom(options)
    }
}

impl RangeAnimation {
    /// Decodes `true`, `false` or `{"duration": ms, "easingFunction": name}`.
    pub fn from_json_value(value: &Value) -> RangeResult<Self> {
        match value {
            Value::Null => Ok(Self::Disabled),
            Value::Bool(enabled) => Ok(Self::from(*enabled)),
            Value::Object(object) => {
                let mut options = AnimationOptions::default();
                for (key, value) in object {
                    match key.as_str() {
                        "duration" => {
                            let duration = value.as_f64().ok_or_else(|| {
                                RangeError::InvalidOptions(
                                    "animation duration must be a number".to_owned(),
                                )
                            })?;
                            options = options.with_duration_ms(duration);
                        }
                        "easingFunction" => {
                            let name = value.as_str().ok_or_else(|| {
                                RangeError::InvalidOptions(
                                    "animation easingFunction must be a string".to_owned(),
                                )
                            })?;
                            options = options.with_easing_name(name)?;
                        }
                        other => {
                            return Err(RangeError::InvalidOptions(format!(
                                "unknown animation option \"{other}\""
                            )));
                        }
                    }
                }
                Ok(Self::Custom(options))
            }
            _ => Err(RangeError::InvalidOptions(
                "animation must be a boolean or an object".to_owned(),
            )),
        }
    }

    /// Resolves duration and easing, or `None` for an immediate change.
    ///
    /// Negative or non-finite durations collapse to zero.
    #[must_use]
    pub(super) fn resolve(self) -> Option<(f64, EasingFunction)> {
        match self {
            Self::Disabled => None,
            Self::Enabled => Some((DEFAULT_ANIMATION_DURATION_MS, EasingFunction::default())),
            Self::Custom(options) => {
                let duration = options
                    .duration_ms
                    .unwrap_or(DEFAULT_ANIMATION_DURATION_MS);
                let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
                Some((duration, options.easing.unwrap_or_default()))
            }
        }
    }
}

pub type CompletionCallback = Box<dyn FnOnce()>;
/// Called per frame with `(ease, changed, done)`.
pub type FrameCallback = Box<dyn FnMut(f64, bool, bool)>;

/// One range request: target plus animation, attribution and callbacks.
#[derive(Default)]
pub struct RangeRequest {
    pub animation: RangeAnimation,
    pub by_user: bool,
    pub event: Option<InputEvent>,
    pub on_complete: Option<CompletionCallback>,
    pub on_frame: Option<FrameCallback>,
}

impl fmt::Debug for RangeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeRequest")
            .field("animation", &self.animation)
            .field("by_user", &self.by_user)
            .field("event", &self.event)
            .field("on_complete", &self.on_complete.is_some())
            .field("on_frame", &self.on_frame.is_some())
            .finish()
    }
}

impl RangeRequest {
    #[must_use]
    pub fn animated(animation: impl Into<RangeAnimation>) -> Self {
        Self {
            animation: animation.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub(crate) fn from_user(event: Option<InputEvent>) -> Self {
        Self {
            by_user: true,
            event,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_by_user(mut self, by_user: bool) -> Self {
        self.by_user = by_user;
        self
    }

    #[must_use]
    pub fn with_event(mut self, event: InputEvent) -> Self {
        self.event = Some(event);
        self
    }

    #[must_use]
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_frame(mut self, callback: impl FnMut(f64, bool, bool) + 'static) -> Self {
        self.on_frame = Some(Box::new(callback));
        self
    }
}

/// Interpolated frame of a running animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct AnimationFrame {
    pub(super) ease: f64,
    pub(super) done: bool,
    pub(super) start: Option<f64>,
    pub(super) end: Option<f64>,
}

pub(super) struct AnimationState {
    pub(super) initial: TimeWindow,
    pub(super) target_start: Option<f64>,
    pub(super) target_end: Option<f64>,
    pub(super) started_at: f64,
    pub(super) duration_ms: f64,
    pub(super) easing: EasingFunction,
    pub(super) any_changed: bool,
    pub(super) by_user: bool,
    pub(super) event: Option<InputEvent>,
    pub(super) on_complete: Option<CompletionCallback>,
    pub(super) on_frame: Option<FrameCallback>,
    pub(super) timer: Option<TimerHandle>,
}

impl AnimationState {
    /// Interpolates the frame `now - started_at` milliseconds in.
    ///
    /// A `None` target bound stays `None` so the current value is held. The
    /// frame after the duration elapsed carries the exact target.
    pub(super) fn frame_at(&self, now: f64) -> AnimationFrame {
        let elapsed = now - self.started_at;
        let fraction = if self.duration_ms > 0.0 {
            elapsed / self.duration_ms
        } else {
            1.0
        };
        let ease = self.easing.apply(fraction);
        let done = elapsed > self.duration_ms;

        let interpolate = |initial: f64, target: Option<f64>| match target {
            Some(target) if !done => Some(initial + (target - initial) * ease),
            other => other,
        };

        AnimationFrame {
            ease,
            done,
            start: interpolate(self.initial.start, self.target_start),
            end: interpolate(self.initial.end, self.target_end),
        }
    }
}
