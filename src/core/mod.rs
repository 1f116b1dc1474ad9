pub mod conversion;
pub mod easing;
pub mod hidden_dates;
pub mod scheduler;
pub mod types;

pub use conversion::{
    AxisMapping, AxisOrientation, AxisSelector, Direction, PixelConversion, pixel_to_time,
    time_to_pixel,
};
pub use easing::EasingFunction;
pub use hidden_dates::{FrontBias, HiddenDates, HiddenInterval, NoHiddenDates, StaticHiddenIntervals};
pub use scheduler::{Clock, ManualClock, SystemClock, TimerHandle, TimerQueue};
pub use types::{MILLIS_PER_DAY, TimeWindow, Viewport, datetime_to_millis, millis_to_datetime};
