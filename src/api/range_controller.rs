use std::cell::Cell;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    AxisMapping, Clock, Direction, FrontBias, HiddenDates, MILLIS_PER_DAY, NoHiddenDates,
    PixelConversion, SystemClock, TimeWindow, TimerHandle, TimerQueue, Viewport,
};
use crate::error::RangeResult;
use crate::extensions::{ListenerId, RangeEventBus, RangeEventKind, RangeListener};
use crate::interaction::InteractionState;

use super::range_animation::AnimationState;
use super::range_constraint_resolver::{RangeConstraintInput, resolve_constrained_range};
use super::range_validation::validate_range_options;
use super::{RangeOptions, RangeOptionsPatch, RangeRequest, TimerTask};

/// Controller bootstrap configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeControllerConfig {
    #[serde(default)]
    pub options: RangeOptions,
    /// Initial window start; defaults to three days before today's midnight.
    #[serde(default)]
    pub start: Option<f64>,
    /// Initial window end; defaults to three days after today's midnight.
    #[serde(default)]
    pub end: Option<f64>,
    #[serde(default)]
    pub viewport: Viewport,
}

impl Default for RangeControllerConfig {
    fn default() -> Self {
        Self::new(RangeOptions::default())
    }
}

impl RangeControllerConfig {
    #[must_use]
    pub fn new(options: RangeOptions) -> Self {
        Self {
            options,
            start: None,
            end: None,
            viewport: Viewport::default(),
        }
    }

    #[must_use]
    pub fn with_window(mut self, start: f64, end: f64) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(super) struct RollingState {
    pub(super) active: bool,
    pub(super) timer: Option<TimerHandle>,
}

/// Owner of the visible time window of a timeline widget.
///
/// All state changes happen on the caller's thread. Scheduled work (animation
/// frames, settled notifications, live-mode refreshes) sits in an owned timer
/// queue that the host drains with [`RangeController::run_due_timers`].
pub struct RangeController<C: Clock = SystemClock> {
    pub(super) clock: C,
    pub(super) options: RangeOptions,
    pub(super) window: TimeWindow,
    pub(super) viewport: Viewport,
    pub(super) hidden_dates: Box<dyn HiddenDates>,
    pub(super) front_bias: FrontBias,
    pub(super) interaction: InteractionState,
    pub(super) animation: Option<AnimationState>,
    pub(super) settle_timer: Option<TimerHandle>,
    pub(super) rolling: RollingState,
    pub(super) timers: TimerQueue<TimerTask>,
    pub(super) events: RangeEventBus,
    pub(super) ms_per_pixel_cache: Cell<Option<f64>>,
    pub(super) destroyed: bool,
}

impl RangeController<SystemClock> {
    pub fn with_system_clock(config: RangeControllerConfig) -> RangeResult<Self> {
        Self::new(SystemClock, config)
    }
}

impl<C: Clock> RangeController<C> {
    /// Builds a controller and applies the configured initial window.
    ///
    /// A missing bound defaults to today's midnight shifted by three days
    /// (before for start, after for end). Constraints apply, but no
    /// notification fires during construction.
    pub fn new(clock: C, config: RangeControllerConfig) -> RangeResult<Self> {
        validate_range_options(&config.options)?;

        let midnight = clock.start_of_day(clock.now_ms());
        let default_window = TimeWindow::new(
            midnight - 3.0 * MILLIS_PER_DAY,
            midnight + 3.0 * MILLIS_PER_DAY,
        );

        let mut controller = Self {
            clock,
            options: config.options,
            window: default_window,
            viewport: config.viewport,
            hidden_dates: Box::new(NoHiddenDates),
            front_bias: FrontBias::default(),
            interaction: InteractionState::default(),
            animation: None,
            settle_timer: None,
            rolling: RollingState::default(),
            timers: TimerQueue::new(),
            events: RangeEventBus::default(),
            ms_per_pixel_cache: Cell::new(None),
            destroyed: false,
        };

        if config.start.is_some() || config.end.is_some() {
            let resolved = resolve_constrained_range(controller.constraint_input(
                config.start,
                config.end,
            ))?;
            controller.window = resolved.window;
        }

        if controller.options.rolling_mode.follow {
            controller.start_rolling()?;
        }

        debug!(
            start = controller.window.start,
            end = controller.window.end,
            "range controller initialized"
        );
        Ok(controller)
    }

    #[must_use]
    pub fn with_hidden_dates(mut self, hidden_dates: impl HiddenDates + 'static) -> Self {
        self.set_hidden_dates(hidden_dates);
        self
    }

    pub fn set_hidden_dates(&mut self, hidden_dates: impl HiddenDates + 'static) {
        self.hidden_dates = Box::new(hidden_dates);
        self.refresh_hidden_dates();
    }

    #[must_use]
    pub fn hidden_dates(&self) -> &dyn HiddenDates {
        self.hidden_dates.as_ref()
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn options(&self) -> &RangeOptions {
        &self.options
    }

    /// Merges recognized fields into the current options.
    ///
    /// A patch carrying `start`/`end` applies them afterwards as a
    /// non-animated range request. Enabling `rolling_mode.follow` starts
    /// live mode.
    pub fn set_options(&mut self, patch: RangeOptionsPatch) -> RangeResult<()> {
        let merged = self.options.merged(&patch)?;
        self.options = merged;
        self.invalidate_ms_per_pixel();
        debug!(options = ?self.options, "range options updated");

        if self.options.rolling_mode.follow {
            self.start_rolling()?;
        }
        if patch.has_window() {
            self.set_range(patch.start, patch.end, RangeRequest::default())?;
        }
        Ok(())
    }

    /// Parses a JSON options object and merges it, see [`RangeOptionsPatch::from_json_str`].
    pub fn set_options_json(&mut self, input: &str) -> RangeResult<()> {
        let patch = RangeOptionsPatch::from_json_str(input)?;
        self.set_options(patch)
    }

    #[must_use]
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.invalidate_ms_per_pixel();
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    #[must_use]
    pub fn front_bias(&self) -> FrontBias {
        self.front_bias
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    #[must_use]
    pub fn has_pending_settle(&self) -> bool {
        self.settle_timer.is_some()
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Milliseconds covered by one pixel of the center panel width.
    ///
    /// Cached until the window, viewport or options change.
    #[must_use]
    pub fn milliseconds_per_pixel(&self) -> f64 {
        if let Some(cached) = self.ms_per_pixel_cache.get() {
            return cached;
        }
        let value = self.window.span() / self.viewport.width;
        self.ms_per_pixel_cache.set(Some(value));
        value
    }

    /// Conversion of the current window onto `width` pixels.
    #[must_use]
    pub fn conversion(&self, width: f64) -> PixelConversion {
        PixelConversion::to_pixel_space(self.window, width, 0.0)
    }

    /// Conversion excluding `total_hidden_duration` from the visible span.
    #[must_use]
    pub fn conversion_with_hidden(&self, width: f64, total_hidden_duration: f64) -> PixelConversion {
        PixelConversion::to_pixel_space(self.window, width, total_hidden_duration)
    }

    /// Maps a pixel offset along the center panel width to an instant.
    ///
    /// Hidden intervals occupy no pixels.
    #[must_use]
    pub fn to_time(&self, pixel: f64) -> f64 {
        let width = self.viewport.width;
        if !self.hidden_dates.has_hidden_dates() || width == 0.0 {
            return self.conversion(width).pixel_to_time(pixel);
        }

        let hidden = self
            .hidden_dates
            .hidden_duration_between(self.window.start, self.window.end);
        let visible_duration = self.window.span() - hidden;
        let partial = visible_duration * pixel / width;
        let skipped = self
            .hidden_dates
            .accumulated_hidden_duration(self.window, partial);
        self.window.start + partial + skipped
    }

    /// Maps a pointer position relative to the center panel to an instant on
    /// the active axis.
    #[must_use]
    pub fn pointer_to_date(&self, x: f64, y: f64) -> f64 {
        let axis = self.axis_mapping();
        match self.options.direction {
            Direction::Horizontal => {
                let offset = if self.options.rtl {
                    axis.extent(self.viewport) - x
                } else {
                    x
                };
                self.to_time(offset)
            }
            Direction::Vertical => self.conversion(self.viewport.height).pixel_to_time(y),
        }
    }

    pub(super) fn is_inside_range(&self, x: f64, y: f64) -> bool {
        self.window.contains(self.pointer_to_date(x, y))
    }

    pub(super) fn axis_mapping(&self) -> AxisMapping {
        AxisMapping::resolve(self.options.direction, self.options.rtl)
    }

    pub fn on(
        &mut self,
        kind: RangeEventKind,
        listener: impl RangeListener + 'static,
    ) -> ListenerId {
        self.events.on(kind, listener)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    /// Time of the next scheduled timer, for hosts that sleep between runs.
    #[must_use]
    pub fn next_deadline(&self) -> Option<f64> {
        self.timers.next_deadline()
    }

    #[must_use]
    pub fn pending_timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Stops live mode and cancels every pending animation and notification.
    ///
    /// Later timer runs are ignored.
    pub fn destroy(&mut self) {
        self.stop_rolling();
        self.cancel_animation();
        self.cancel_settle();
        self.timers.clear();
        self.destroyed = true;
        debug!("range controller destroyed");
    }

    pub(super) fn invalidate_ms_per_pixel(&self) {
        self.ms_per_pixel_cache.set(None);
    }

    pub(super) fn refresh_hidden_dates(&mut self) {
        self.hidden_dates
            .update_hidden_dates(self.window, self.front_bias);
    }

    pub(super) fn constraint_input(
        &self,
        start: Option<f64>,
        end: Option<f64>,
    ) -> RangeConstraintInput {
        RangeConstraintInput {
            current: self.window,
            start,
            end,
            min: self.options.min,
            max: self.options.max,
            zoom_min: self.options.zoom_min,
            zoom_max: self.options.zoom_max,
        }
    }
}
