use tracing::{debug, trace};

use crate::core::Clock;
use crate::error::RangeResult;

use super::{RangeController, RangeRequest, TimerTask};

pub const ROLLING_REFRESH_MIN_MS: f64 = 30.0;
pub const ROLLING_REFRESH_MAX_MS: f64 = 1000.0;

/// Refresh period of live mode: a tenth of the time one pixel covers.
fn rolling_refresh_interval(pixels_per_ms: f64) -> f64 {
    let interval = 1.0 / pixels_per_ms / 10.0;
    if interval.is_finite() {
        interval.clamp(ROLLING_REFRESH_MIN_MS, ROLLING_REFRESH_MAX_MS)
    } else {
        ROLLING_REFRESH_MAX_MS
    }
}

impl<C: Clock> RangeController<C> {
    /// Enters live mode: keeps "now" at `rolling_mode.offset` within the
    /// current span and re-centers on a scale-dependent refresh period.
    ///
    /// Restarts the refresh cycle when already rolling.
    pub fn start_rolling(&mut self) -> RangeResult<()> {
        debug!(offset = self.options.rolling_mode.offset, "rolling mode started");
        self.roll_update()
    }

    /// Leaves live mode. No-op when not rolling.
    pub fn stop_rolling(&mut self) {
        if !self.rolling.active {
            return;
        }
        if let Some(timer) = self.rolling.timer.take() {
            self.timers.cancel(timer);
        }
        self.rolling.active = false;
        debug!("rolling mode stopped");
    }

    pub fn toggle_rolling(&mut self) -> RangeResult<()> {
        if self.rolling.active {
            self.stop_rolling();
            Ok(())
        } else {
            self.start_rolling()
        }
    }

    #[must_use]
    pub fn is_rolling(&self) -> bool {
        self.rolling.active
    }

    pub(super) fn roll_update(&mut self) -> RangeResult<()> {
        if let Some(timer) = self.rolling.timer.take() {
            self.timers.cancel(timer);
        }
        self.rolling.active = true;

        let span = self.window.span();
        let now = self.clock.now_ms();
        let offset = self.options.rolling_mode.offset;
        self.set_range(
            Some(now - span * offset),
            Some(now + span * (1.0 - offset)),
            RangeRequest::default(),
        )?;

        let interval = rolling_refresh_interval(self.conversion(self.viewport.width).scale);
        self.rolling.timer = self.schedule_timer(interval, TimerTask::RollingRefresh);
        trace!(interval_ms = interval, "rolling refresh scheduled");
        Ok(())
    }
}
