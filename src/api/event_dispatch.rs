use tracing::trace;

use crate::core::Clock;
use crate::extensions::{RangeChange, RangeEvent};
use crate::interaction::InputEvent;

use super::RangeController;

impl<C: Clock> RangeController<C> {
    /// Snapshot of the current window for a change notification.
    pub(super) fn change_payload(&self, by_user: bool, event: Option<InputEvent>) -> RangeChange {
        RangeChange {
            start: self.window.start,
            end: self.window.end,
            by_user,
            event,
        }
    }

    pub(super) fn emit_range_change(&mut self, change: RangeChange) {
        trace!(start = change.start, end = change.end, by_user = change.by_user, "rangechange");
        self.events.emit(RangeEvent::RangeChange(change));
    }

    pub(super) fn emit_range_changed(&mut self, change: RangeChange) {
        trace!(start = change.start, end = change.end, by_user = change.by_user, "rangechanged");
        self.events.emit(RangeEvent::RangeChanged(change));
    }

    pub(super) fn emit_check_ranged_items(&mut self) {
        trace!("checkRangedItems");
        self.events.emit(RangeEvent::CheckRangedItems);
    }

    pub(super) fn emit_pan_move(&mut self) {
        self.events.emit(RangeEvent::PanMove);
    }
}
