//! Host-facing extension points.
//!
//! Event delivery lives here so the controller core never depends on how the
//! host consumes notifications.

pub mod events;

pub use events::{
    ListenerId, RangeChange, RangeEvent, RangeEventBus, RangeEventKind, RangeListener,
};
