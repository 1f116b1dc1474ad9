use tracing::{trace, warn};

use crate::core::{Clock, TimerHandle};
use crate::extensions::RangeChange;

use super::RangeController;

/// Work item held by the controller's timer queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerTask {
    /// Next frame of the running animation.
    AnimationFrame,
    /// Trailing `rangechanged` for a non-animated update.
    SettleNotification(RangeChange),
    /// Live-mode re-centering on "now".
    RollingRefresh,
}

impl<C: Clock> RangeController<C> {
    /// Fires every timer whose deadline is not later than the clock's "now".
    ///
    /// Timers scheduled by a firing task run in the same call when already
    /// due. Returns the number of timers fired; a destroyed controller fires
    /// nothing.
    pub fn run_due_timers(&mut self) -> usize {
        if self.destroyed {
            return 0;
        }
        let now = self.clock.now_ms();
        let mut fired = 0;
        while let Some((handle, task)) = self.timers.pop_due(now) {
            fired += 1;
            self.dispatch_timer(handle, task);
        }
        fired
    }

    fn dispatch_timer(&mut self, handle: TimerHandle, task: TimerTask) {
        trace!(?handle, ?task, "timer fired");
        match task {
            TimerTask::AnimationFrame => {
                if let Some(animation) = self.animation.as_mut() {
                    if animation.timer == Some(handle) {
                        animation.timer = None;
                    }
                }
                if let Err(err) = self.run_animation_frame() {
                    warn!(error = %err, "range animation dropped");
                }
            }
            TimerTask::SettleNotification(change) => {
                if self.settle_timer == Some(handle) {
                    self.settle_timer = None;
                }
                self.emit_range_changed(change);
            }
            TimerTask::RollingRefresh => {
                if self.rolling.timer == Some(handle) {
                    self.rolling.timer = None;
                }
                if let Err(err) = self.roll_update() {
                    warn!(error = %err, "rolling refresh failed, leaving live mode");
                    self.stop_rolling();
                }
            }
        }
    }
}
