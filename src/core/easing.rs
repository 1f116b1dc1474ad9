use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RangeError;

/// Named easing curves accepted by animated range transitions.
///
/// Each curve maps an elapsed fraction `t` (nominally `0..=1`) to an
/// interpolation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EasingFunction {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    #[default]
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
}

impl EasingFunction {
    pub const ALL: [EasingFunction; 13] = [
        Self::Linear,
        Self::EaseInQuad,
        Self::EaseOutQuad,
        Self::EaseInOutQuad,
        Self::EaseInCubic,
        Self::EaseOutCubic,
        Self::EaseInOutCubic,
        Self::EaseInQuart,
        Self::EaseOutQuart,
        Self::EaseInOutQuart,
        Self::EaseInQuint,
        Self::EaseOutQuint,
        Self::EaseInOutQuint,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseInQuad => "easeInQuad",
            Self::EaseOutQuad => "easeOutQuad",
            Self::EaseInOutQuad => "easeInOutQuad",
            Self::EaseInCubic => "easeInCubic",
            Self::EaseOutCubic => "easeOutCubic",
            Self::EaseInOutCubic => "easeInOutCubic",
            Self::EaseInQuart => "easeInQuart",
            Self::EaseOutQuart => "easeOutQuart",
            Self::EaseInOutQuart => "easeInOutQuart",
            Self::EaseInQuint => "easeInQuint",
            Self::EaseOutQuint => "easeOutQuint",
            Self::EaseInOutQuint => "easeInOutQuint",
        }
    }

    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::EaseInQuad => t * t,
            Self::EaseOutQuad => t * (2.0 - t),
            Self::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::EaseInCubic => t.powi(3),
            Self::EaseOutCubic => (t - 1.0).powi(3) + 1.0,
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t.powi(3)
                } else {
                    (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
                }
            }
            Self::EaseInQuart => t.powi(4),
            Self::EaseOutQuart => 1.0 - (t - 1.0).powi(4),
            Self::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - 8.0 * (t - 1.0).powi(4)
                }
            }
            Self::EaseInQuint => t.powi(5),
            Self::EaseOutQuint => 1.0 + (t - 1.0).powi(5),
            Self::EaseInOutQuint => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 + 16.0 * (t - 1.0).powi(5)
                }
            }
        }
    }

    fn supported_names() -> String {
        Self::ALL
            .iter()
            .map(|easing| easing.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for EasingFunction {
    type Err = RangeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|easing| easing.name() == name)
            .ok_or_else(|| RangeError::UnknownEasingFunction {
                name: name.to_owned(),
                supported: Self::supported_names(),
            })
    }
}
