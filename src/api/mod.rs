mod event_dispatch;
mod gesture_drag_controller;
mod gesture_pinch_controller;
mod gesture_wheel_controller;
mod navigation_controller;
mod range_animation;
mod range_constraint_resolver;
mod range_controller;
mod range_options;
mod range_transition_controller;
mod range_validation;
mod rolling_controller;
mod timer_dispatch;
mod zoom_target_resolver;

pub use range_animation::{
    ANIMATION_FRAME_INTERVAL_MS, AnimationOptions, CompletionCallback,
    DEFAULT_ANIMATION_DURATION_MS, FrameCallback, RangeAnimation, RangeRequest,
};
pub use range_controller::{RangeController, RangeControllerConfig};
pub use range_options::{
    DEFAULT_SETTLE_DELAY_MS, DEFAULT_ZOOM_FRICTION, DEFAULT_ZOOM_MAX_MS, DEFAULT_ZOOM_MIN_MS,
    RANGE_OPTION_KEYS, RangeOptions, RangeOptionsPatch, RollingMode,
};
pub use rolling_controller::{ROLLING_REFRESH_MAX_MS, ROLLING_REFRESH_MIN_MS};
pub use timer_dispatch::TimerTask;
