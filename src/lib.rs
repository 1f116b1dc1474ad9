//! timeline-range: visible time-window controller for timeline widgets.
//!
//! The crate owns the `[start, end]` window of an interactive timeline and
//! reconciles it against drag, wheel, pinch and programmatic requests while
//! honoring bounds, zoom limits, hidden intervals and live mode. Rendering
//! and gesture capture stay with the host.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod telemetry;

pub use api::{
    AnimationOptions, RangeAnimation, RangeController, RangeControllerConfig, RangeOptions,
    RangeOptionsPatch, RangeRequest,
};
pub use error::{RangeError, RangeResult};
