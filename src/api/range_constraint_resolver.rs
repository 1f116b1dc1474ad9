use crate::core::TimeWindow;
use crate::error::{RangeError, RangeResult};

/// Slack allowed on the start bound when the window already sits at the zoom floor.
const ZOOM_FLOOR_COMPENSATION_MS: f64 = 0.5;

pub(super) struct RangeConstraintInput {
    pub(super) current: TimeWindow,
    pub(super) start: Option<f64>,
    pub(super) end: Option<f64>,
    pub(super) min: Option<f64>,
    pub(super) max: Option<f64>,
    pub(super) zoom_min: Option<f64>,
    pub(super) zoom_max: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ConstrainedRange {
    pub(super) window: TimeWindow,
    pub(super) changed: bool,
    /// New and previous windows share no instant.
    pub(super) disjoint: bool,
}

/// Corrects a candidate window against ordering, bounds and zoom limits.
///
/// Bound clamping runs min first, then max. When `max - min` is narrower than
/// the zoom floor the result can violate one of the bounds; that priority is
/// kept as-is.
pub(super) fn resolve_constrained_range(
    input: RangeConstraintInput,
) -> RangeResult<ConstrainedRange> {
    let RangeConstraintInput {
        current,
        start,
        end,
        min,
        max,
        zoom_min,
        zoom_max,
    } = input;

    let mut new_start = start.unwrap_or(current.start);
    let mut new_end = end.unwrap_or(current.end);
    if !new_start.is_finite() || !new_end.is_finite() {
        return Err(RangeError::InvalidRange {
            start: new_start,
            end: new_end,
        });
    }

    if new_end < new_start {
        new_end = new_start;
    }

    if let Some(min) = min {
        if new_start < min {
            let diff = min - new_start;
            new_start += diff;
            new_end += diff;
            if let Some(max) = max {
                if new_end > max {
                    new_end = max;
                }
            }
        }
    }

    if let Some(max) = max {
        if new_end > max {
            let diff = new_end - max;
            new_start -= diff;
            new_end -= diff;
            if let Some(min) = min {
                if new_start < min {
                    new_start = min;
                }
            }
        }
    }

    if let Some(zoom_min) = zoom_min.filter(|limit| limit.is_finite()) {
        let zoom_min = zoom_min.max(0.0);
        if new_end - new_start < zoom_min {
            let at_floor = current.span() == zoom_min
                && new_start >= current.start - ZOOM_FLOOR_COMPENSATION_MS
                && new_end <= current.end;
            if at_floor {
                new_start = current.start;
                new_end = current.end;
            } else {
                let diff = zoom_min - (new_end - new_start);
                new_start -= diff / 2.0;
                new_end += diff / 2.0;
            }
        }
    }

    if let Some(zoom_max) = zoom_max.filter(|limit| limit.is_finite()) {
        let zoom_max = zoom_max.max(0.0);
        if new_end - new_start > zoom_max {
            let at_ceiling = current.span() == zoom_max
                && new_start < current.start
                && new_end > current.end;
            if at_ceiling {
                new_start = current.start;
                new_end = current.end;
            } else {
                let diff = (new_end - new_start) - zoom_max;
                new_start += diff / 2.0;
                new_end -= diff / 2.0;
            }
        }
    }

    let window = TimeWindow::new(new_start, new_end);
    Ok(ConstrainedRange {
        window,
        changed: current.start != new_start || current.end != new_end,
        disjoint: !window.overlaps(current),
    })
}
