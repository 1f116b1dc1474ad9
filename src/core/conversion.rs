use serde::{Deserialize, Serialize};

use crate::core::{TimeWindow, Viewport};

/// Linear time/pixel mapping for a visible window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelConversion {
    pub offset: f64,
    pub scale: f64,
}

impl PixelConversion {
    pub const IDENTITY: Self = Self {
        offset: 0.0,
        scale: 1.0,
    };

    /// Builds the conversion of `window` onto `width` pixels, excluding
    /// `total_hidden_duration` milliseconds from the visible span.
    ///
    /// Returns the identity mapping when either the width or the window span
    /// is zero.
    #[must_use]
    pub fn to_pixel_space(window: TimeWindow, width: f64, total_hidden_duration: f64) -> Self {
        if width != 0.0 && window.end != window.start {
            Self {
                offset: window.start,
                scale: width / (window.end - window.start - total_hidden_duration),
            }
        } else {
            Self::IDENTITY
        }
    }

    #[must_use]
    pub fn pixel_to_time(self, pixel: f64) -> f64 {
        pixel_to_time(pixel, self.offset, self.scale)
    }

    #[must_use]
    pub fn time_to_pixel(self, time: f64) -> f64 {
        time_to_pixel(time, self.offset, self.scale)
    }
}

#[must_use]
pub fn pixel_to_time(pixel: f64, offset: f64, scale: f64) -> f64 {
    pixel / scale + offset
}

#[must_use]
pub fn time_to_pixel(time: f64, offset: f64, scale: f64) -> f64 {
    (time - offset) * scale
}

/// Layout axis of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Horizontal,
    Vertical,
}

impl Direction {
    pub const SUPPORTED: [&'static str; 2] = ["horizontal", "vertical"];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = crate::error::RangeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            other => Err(crate::error::RangeError::InvalidDirection(other.to_owned())),
        }
    }
}

/// Which pointer component drives the active axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSelector {
    X,
    Y,
}

/// How a pointer drag translates into time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    /// Content follows the pointer: dragging right moves back in time.
    LeftToRight,
    /// Mirrored layout: dragging right moves forward in time.
    RightToLeft,
}

/// Axis mapping selected once per gesture from direction and rtl flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMapping {
    pub selector: AxisSelector,
    pub orientation: AxisOrientation,
}

impl AxisMapping {
    #[must_use]
    pub fn resolve(direction: Direction, rtl: bool) -> Self {
        let selector = match direction {
            Direction::Horizontal => AxisSelector::X,
            Direction::Vertical => AxisSelector::Y,
        };
        let orientation = if rtl {
            AxisOrientation::RightToLeft
        } else {
            AxisOrientation::LeftToRight
        };
        Self {
            selector,
            orientation,
        }
    }

    #[must_use]
    pub fn pick(self, x: f64, y: f64) -> f64 {
        match self.selector {
            AxisSelector::X => x,
            AxisSelector::Y => y,
        }
    }

    #[must_use]
    pub fn extent(self, viewport: Viewport) -> f64 {
        match self.selector {
            AxisSelector::X => viewport.width,
            AxisSelector::Y => viewport.height,
        }
    }

    /// Converts a pointer delta into a time delta for a window spanning
    /// `visible_duration` over `extent_px` pixels.
    #[must_use]
    pub fn delta_to_time(self, delta_px: f64, extent_px: f64, visible_duration: f64) -> f64 {
        let magnitude = delta_px / extent_px * visible_duration;
        match self.orientation {
            AxisOrientation::LeftToRight => -magnitude,
            AxisOrientation::RightToLeft => magnitude,
        }
    }
}
