use crate::error::{RangeError, RangeResult};

use super::RangeOptions;

pub(super) fn validate_range_options(options: &RangeOptions) -> RangeResult<()> {
    for (name, bound) in [("min", options.min), ("max", options.max)] {
        if let Some(value) = bound {
            if !value.is_finite() {
                return Err(RangeError::InvalidOptions(format!(
                    "range {name} bound must be finite"
                )));
            }
        }
    }

    for (name, limit) in [("zoomMin", options.zoom_min), ("zoomMax", options.zoom_max)] {
        if limit.is_some_and(f64::is_nan) {
            return Err(RangeError::InvalidOptions(format!(
                "range {name} must be a number"
            )));
        }
    }

    if !options.zoom_friction.is_finite() || options.zoom_friction <= 0.0 {
        return Err(RangeError::InvalidOptions(
            "zoom friction must be finite and > 0".to_owned(),
        ));
    }

    let offset = options.rolling_mode.offset;
    if !offset.is_finite() || !(0.0..=1.0).contains(&offset) {
        return Err(RangeError::InvalidOptions(
            "rolling mode offset must be within [0, 1]".to_owned(),
        ));
    }

    if !options.settle_delay_ms.is_finite() || options.settle_delay_ms < 0.0 {
        return Err(RangeError::InvalidOptions(
            "settle delay must be finite and >= 0".to_owned(),
        ));
    }

    Ok(())
}
