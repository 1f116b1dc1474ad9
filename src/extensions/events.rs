use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::millis_to_datetime;
use crate::error::{RangeError, RangeResult};
use crate::interaction::InputEvent;

/// Names of the notifications published by the range controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeEventKind {
    /// Window is changing; may fire many times per gesture or animation.
    #[serde(rename = "rangechange")]
    RangeChange,
    /// Window settled; fires once per logical operation.
    #[serde(rename = "rangechanged")]
    RangeChanged,
    /// Window jumped without overlap; ranged entities need re-evaluation.
    #[serde(rename = "checkRangedItems")]
    CheckRangedItems,
    /// Drag gesture pass-through.
    #[serde(rename = "panmove")]
    PanMove,
}

impl RangeEventKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::RangeChange => "rangechange",
            Self::RangeChanged => "rangechanged",
            Self::CheckRangedItems => "checkRangedItems",
            Self::PanMove => "panmove",
        }
    }
}

impl fmt::Display for RangeEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RangeEventKind {
    type Err = RangeError;

    fn from_str(name: &str) -> RangeResult<Self> {
        match name {
            "rangechange" => Ok(Self::RangeChange),
            "rangechanged" => Ok(Self::RangeChanged),
            "checkRangedItems" => Ok(Self::CheckRangedItems),
            "panmove" => Ok(Self::PanMove),
            other => Err(RangeError::InvalidOptions(format!(
                "unknown range event name \"{other}\""
            ))),
        }
    }
}

/// Payload of `rangechange` / `rangechanged`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeChange {
    pub start: f64,
    pub end: f64,
    pub by_user: bool,
    pub event: Option<InputEvent>,
}

impl RangeChange {
    #[must_use]
    pub fn start_datetime(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.start)
    }

    #[must_use]
    pub fn end_datetime(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RangeEvent {
    RangeChange(RangeChange),
    RangeChanged(RangeChange),
    CheckRangedItems,
    PanMove,
}

impl RangeEvent {
    #[must_use]
    pub fn kind(&self) -> RangeEventKind {
        match self {
            Self::RangeChange(_) => RangeEventKind::RangeChange,
            Self::RangeChanged(_) => RangeEventKind::RangeChanged,
            Self::CheckRangedItems => RangeEventKind::CheckRangedItems,
            Self::PanMove => RangeEventKind::PanMove,
        }
    }

    #[must_use]
    pub fn change(&self) -> Option<&RangeChange> {
        match self {
            Self::RangeChange(change) | Self::RangeChanged(change) => Some(change),
            Self::CheckRangedItems | Self::PanMove => None,
        }
    }
}

/// Subscriber interface for range notifications.
///
/// Listeners observe events without access to the controller, so they can
/// never re-enter it mid-update.
pub trait RangeListener {
    fn on_event(&mut self, event: &RangeEvent);
}

impl<F> RangeListener for F
where
    F: FnMut(&RangeEvent),
{
    fn on_event(&mut self, event: &RangeEvent) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct Subscription {
    kind: RangeEventKind,
    listener: Box<dyn RangeListener>,
}

/// In-process publish/subscribe registry.
///
/// Listeners for one event run in subscription order.
#[derive(Default)]
pub struct RangeEventBus {
    next_id: u64,
    subscriptions: IndexMap<ListenerId, Subscription>,
}

impl fmt::Debug for RangeEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeEventBus")
            .field("listeners", &self.subscriptions.len())
            .finish()
    }
}

impl RangeEventBus {
    pub fn on(&mut self, kind: RangeEventKind, listener: impl RangeListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.subscriptions.insert(
            id,
            Subscription {
                kind,
                listener: Box::new(listener),
            },
        );
        id
    }

    /// Removes a listener. Returns `false` when the id was unknown.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.subscriptions.shift_remove(&id).is_some()
    }

    #[must_use]
    pub fn listener_count(&self, kind: RangeEventKind) -> usize {
        self.subscriptions
            .values()
            .filter(|subscription| subscription.kind == kind)
            .count()
    }

    pub fn emit(&mut self, event: RangeEvent) {
        let kind = event.kind();
        for subscription in self.subscriptions.values_mut() {
            if subscription.kind == kind {
                subscription.listener.on_event(&event);
            }
        }
    }

    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}
