use tracing::{debug, trace};

use crate::core::{Clock, TimerHandle};
use crate::error::{RangeError, RangeResult};
use crate::extensions::RangeChange;

use super::range_animation::AnimationState;
use super::range_constraint_resolver::{ConstrainedRange, resolve_constrained_range};
use super::{ANIMATION_FRAME_INTERVAL_MS, RangeController, RangeRequest, TimerTask};

impl<C: Clock> RangeController<C> {
    /// Requests a new visible window.
    ///
    /// `None` keeps the current value of that bound. Without animation the
    /// window is applied at once; when it changed a `rangechange` fires, the
    /// completion callback runs and a `rangechanged` is scheduled after the
    /// settle delay, replacing any pending one. With animation the first
    /// frame runs before this returns and later frames run from the timer
    /// queue.
    ///
    /// Any running animation is cancelled first. Non-finite targets fail
    /// with [`RangeError::InvalidRange`] and leave the controller untouched.
    pub fn set_range(
        &mut self,
        start: Option<f64>,
        end: Option<f64>,
        request: RangeRequest,
    ) -> RangeResult<()> {
        let resolved_start = start.unwrap_or(self.window.start);
        let resolved_end = end.unwrap_or(self.window.end);
        if !resolved_start.is_finite() || !resolved_end.is_finite() {
            return Err(RangeError::InvalidRange {
                start: resolved_start,
                end: resolved_end,
            });
        }

        self.cancel_animation();
        self.invalidate_ms_per_pixel();

        let RangeRequest {
            animation,
            by_user,
            event,
            on_complete,
            on_frame,
        } = request;

        match animation.resolve() {
            Some((duration_ms, easing)) => {
                debug!(
                    start = ?start,
                    end = ?end,
                    duration_ms,
                    easing = easing.name(),
                    "range animation started"
                );
                self.animation = Some(AnimationState {
                    initial: self.window,
                    target_start: start,
                    target_end: end,
                    started_at: self.clock.now_ms(),
                    duration_ms,
                    easing,
                    any_changed: false,
                    by_user,
                    event,
                    on_complete,
                    on_frame,
                    timer: None,
                });
                self.run_animation_frame()
            }
            None => {
                let applied = self.apply_range(start, end)?;
                self.refresh_hidden_dates();
                if applied.changed {
                    let change = self.change_payload(by_user, event);
                    self.emit_range_change(change);
                    self.schedule_settle(change);
                    if let Some(on_complete) = on_complete {
                        on_complete();
                    }
                }
                Ok(())
            }
        }
    }

    /// Runs the candidate through the constraint solver and stores the result.
    ///
    /// The window is written even when nothing changed. `checkRangedItems`
    /// fires before the write when the new window shares no instant with the
    /// previous one. A window that changed drops the pending settled
    /// notification, which would otherwise report a stale window.
    pub(super) fn apply_range(
        &mut self,
        start: Option<f64>,
        end: Option<f64>,
    ) -> RangeResult<ConstrainedRange> {
        let resolved = resolve_constrained_range(self.constraint_input(start, end))?;
        if resolved.disjoint {
            self.emit_check_ranged_items();
        }
        self.window = resolved.window;
        self.invalidate_ms_per_pixel();
        if resolved.changed {
            self.cancel_settle();
        }
        trace!(
            start = resolved.window.start,
            end = resolved.window.end,
            changed = resolved.changed,
            "range applied"
        );
        Ok(resolved)
    }

    /// Drops the running animation and its pending frame, if any.
    pub(super) fn cancel_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            if let Some(timer) = animation.timer {
                self.timers.cancel(timer);
            }
            trace!("range animation cancelled");
        }
    }

    /// Advances the running animation by one frame.
    ///
    /// While a drag is in progress the frame is skipped and retried one frame
    /// interval later.
    pub(super) fn run_animation_frame(&mut self) -> RangeResult<()> {
        let Some(mut animation) = self.animation.take() else {
            return Ok(());
        };
        animation.timer = None;

        if self.interaction.dragging() {
            animation.timer =
                self.schedule_timer(ANIMATION_FRAME_INTERVAL_MS, TimerTask::AnimationFrame);
            self.animation = Some(animation);
            return Ok(());
        }

        let frame = animation.frame_at(self.clock.now_ms());
        let applied = self.apply_range(frame.start, frame.end)?;
        self.refresh_hidden_dates();
        animation.any_changed |= applied.changed;

        let change = self.change_payload(animation.by_user, animation.event);
        if let Some(on_frame) = animation.on_frame.as_mut() {
            on_frame(frame.ease, applied.changed, frame.done);
        }
        if applied.changed {
            self.emit_range_change(change);
        }

        if frame.done {
            debug!(
                start = self.window.start,
                end = self.window.end,
                changed = animation.any_changed,
                "range animation finished"
            );
            if animation.any_changed {
                self.emit_range_changed(change);
                if let Some(on_complete) = animation.on_complete.take() {
                    on_complete();
                }
            }
        } else {
            animation.timer =
                self.schedule_timer(ANIMATION_FRAME_INTERVAL_MS, TimerTask::AnimationFrame);
            self.animation = Some(animation);
        }
        Ok(())
    }

    /// Replaces the pending settled notification with one for `change`.
    pub(super) fn schedule_settle(&mut self, change: RangeChange) {
        self.cancel_settle();
        self.settle_timer = self.schedule_timer(
            self.options.settle_delay_ms,
            TimerTask::SettleNotification(change),
        );
    }

    pub(super) fn cancel_settle(&mut self) {
        if let Some(timer) = self.settle_timer.take() {
            self.timers.cancel(timer);
        }
    }

    /// Schedules `task` `delay_ms` from now. A destroyed controller schedules nothing.
    pub(super) fn schedule_timer(&mut self, delay_ms: f64, task: TimerTask) -> Option<TimerHandle> {
        if self.destroyed {
            return None;
        }
        Some(self.timers.schedule(self.clock.now_ms() + delay_ms, task))
    }
}
