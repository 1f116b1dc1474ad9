use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::{Local, TimeZone, Utc};
use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::core::types::MILLIS_PER_DAY;

/// Wall-clock source for timer deadlines and "now"-relative windows.
pub trait Clock {
    /// Current time in epoch milliseconds.
    fn now_ms(&self) -> f64;

    /// Midnight that starts the calendar day containing `instant`.
    fn start_of_day(&self, instant: f64) -> f64;
}

/// System clock using the local time zone for day boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        Utc::now().timestamp_millis() as f64
    }

    fn start_of_day(&self, instant: f64) -> f64 {
        Local
            .timestamp_millis_opt(instant as i64)
            .single()
            .and_then(|time| time.date_naive().and_hms_opt(0, 0, 0))
            .and_then(|midnight| midnight.and_local_timezone(Local).earliest())
            .map(|midnight| midnight.timestamp_millis() as f64)
            .unwrap_or_else(|| utc_start_of_day(instant))
    }
}

/// Manually advanced clock for deterministic hosts and tests.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// give another to the controller. Day boundaries are computed in UTC.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(now_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(now_ms)),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }

    fn start_of_day(&self, instant: f64) -> f64 {
        utc_start_of_day(instant)
    }
}

fn utc_start_of_day(instant: f64) -> f64 {
    instant - instant.rem_euclid(MILLIS_PER_DAY)
}

/// Owned handle of a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Deadline-ordered queue of cancellable timers.
///
/// Timers sharing a deadline fire in scheduling order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    entries: BTreeMap<(OrderedFloat<f64>, TimerHandle), T>,
    deadlines: IndexMap<TimerHandle, OrderedFloat<f64>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: BTreeMap::new(),
            deadlines: IndexMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline_ms: f64, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        let deadline = OrderedFloat(deadline_ms);
        self.entries.insert((deadline, handle), task);
        self.deadlines.insert(handle, deadline);
        handle
    }

    /// Removes a pending timer. Returns its task when it had not fired yet.
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<T> {
        let deadline = self.deadlines.swap_remove(&handle)?;
        self.entries.remove(&(deadline, handle))
    }

    #[must_use]
    pub fn contains(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle)
    }

    /// Pops the earliest timer whose deadline is `<= now_ms`.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(TimerHandle, T)> {
        let (&(deadline, handle), _) = self.entries.first_key_value()?;
        if deadline.into_inner() > now_ms {
            return None;
        }
        let task = self.entries.remove(&(deadline, handle))?;
        self.deadlines.swap_remove(&handle);
        Some((handle, task))
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<f64> {
        self.entries
            .first_key_value()
            .map(|((deadline, _), _)| deadline.into_inner())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.deadlines.clear();
    }
}
