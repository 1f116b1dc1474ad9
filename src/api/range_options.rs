use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{Direction, datetime_to_millis};
use crate::error::{RangeError, RangeResult};
use crate::interaction::ZoomKey;

use super::range_validation::validate_range_options;

pub const DEFAULT_ZOOM_MIN_MS: f64 = 10.0;
/// Ten thousand years.
pub const DEFAULT_ZOOM_MAX_MS: f64 = 1000.0 * 60.0 * 60.0 * 24.0 * 365.0 * 10_000.0;
pub const DEFAULT_ZOOM_FRICTION: f64 = 5.0;
pub const DEFAULT_SETTLE_DELAY_MS: f64 = 200.0;

fn default_true() -> bool {
    true
}

fn default_zoom_min() -> Option<f64> {
    Some(DEFAULT_ZOOM_MIN_MS)
}

fn default_zoom_max() -> Option<f64> {
    Some(DEFAULT_ZOOM_MAX_MS)
}

fn default_zoom_friction() -> f64 {
    DEFAULT_ZOOM_FRICTION
}

fn default_settle_delay_ms() -> f64 {
    DEFAULT_SETTLE_DELAY_MS
}

fn default_rolling_offset() -> f64 {
    0.5
}

/// Live-mode policy: keep "now" at `offset` (fraction of the span) inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingMode {
    #[serde(default)]
    pub follow: bool,
    #[serde(default = "default_rolling_offset")]
    pub offset: f64,
}

impl Default for RollingMode {
    fn default() -> Self {
        Self {
            follow: false,
            offset: default_rolling_offset(),
        }
    }
}

/// Range controller configuration.
///
/// The struct is serializable so hosts can persist widget setup. Runtime
/// changes go through [`RangeOptionsPatch`] and [`RangeOptions::merged`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeOptions {
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub rtl: bool,
    #[serde(default = "default_true")]
    pub moveable: bool,
    #[serde(default = "default_true")]
    pub zoomable: bool,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default = "default_zoom_min")]
    pub zoom_min: Option<f64>,
    #[serde(default = "default_zoom_max")]
    pub zoom_max: Option<f64>,
    #[serde(default)]
    pub zoom_key: Option<ZoomKey>,
    #[serde(default = "default_zoom_friction")]
    pub zoom_friction: f64,
    #[serde(default)]
    pub rolling_mode: RollingMode,
    /// Delay between the last non-animated change and its settled notification.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: f64,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Horizontal,
            rtl: false,
            moveable: true,
            zoomable: true,
            min: None,
            max: None,
            zoom_min: default_zoom_min(),
            zoom_max: default_zoom_max(),
            zoom_key: None,
            zoom_friction: DEFAULT_ZOOM_FRICTION,
            rolling_mode: RollingMode::default(),
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl RangeOptions {
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    #[must_use]
    pub fn with_zoom_limits(mut self, zoom_min: Option<f64>, zoom_max: Option<f64>) -> Self {
        self.zoom_min = zoom_min;
        self.zoom_max = zoom_max;
        self
    }

    #[must_use]
    pub fn with_interaction(mut self, moveable: bool, zoomable: bool) -> Self {
        self.moveable = moveable;
        self.zoomable = zoomable;
        self
    }

    #[must_use]
    pub fn with_zoom_key(mut self, zoom_key: Option<ZoomKey>) -> Self {
        self.zoom_key = zoom_key;
        self
    }

    #[must_use]
    pub fn with_zoom_friction(mut self, zoom_friction: f64) -> Self {
        self.zoom_friction = zoom_friction;
        self
    }

    #[must_use]
    pub fn with_rolling_mode(mut self, rolling_mode: RollingMode) -> Self {
        self.rolling_mode = rolling_mode;
        self
    }

    #[must_use]
    pub fn with_settle_delay_ms(mut self, settle_delay_ms: f64) -> Self {
        self.settle_delay_ms = settle_delay_ms;
        self
    }

    /// Returns a copy with every field present in `patch` replaced, validated.
    ///
    /// `start`/`end` in the patch are not options; the controller applies them
    /// as a range request after the merge.
    pub fn merged(&self, patch: &RangeOptionsPatch) -> RangeResult<Self> {
        let mut next = *self;
        if let Some(direction) = patch.direction {
            next.direction = direction;
        }
        if let Some(rtl) = patch.rtl {
            next.rtl = rtl;
        }
        if let Some(moveable) = patch.moveable {
            next.moveable = moveable;
        }
        if let Some(zoomable) = patch.zoomable {
            next.zoomable = zoomable;
        }
        if let Some(min) = patch.min {
            next.min = min;
        }
        if let Some(max) = patch.max {
            next.max = max;
        }
        if let Some(zoom_min) = patch.zoom_min {
            next.zoom_min = zoom_min;
        }
        if let Some(zoom_max) = patch.zoom_max {
            next.zoom_max = zoom_max;
        }
        if let Some(zoom_key) = patch.zoom_key {
            next.zoom_key = zoom_key;
        }
        if let Some(zoom_friction) = patch.zoom_friction {
            next.zoom_friction = zoom_friction;
        }
        if let Some(rolling_mode) = patch.rolling_mode {
            next.rolling_mode = rolling_mode;
        }
        if let Some(settle_delay_ms) = patch.settle_delay_ms {
            next.settle_delay_ms = settle_delay_ms;
        }
        validate_range_options(&next)?;
        Ok(next)
    }
}

/// Partial options update.
///
/// `None` leaves a field untouched. For nullable fields `Some(None)` clears
/// the current value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeOptionsPatch {
    pub direction: Option<Direction>,
    pub rtl: Option<bool>,
    pub moveable: Option<bool>,
    pub zoomable: Option<bool>,
    pub min: Option<Option<f64>>,
    pub max: Option<Option<f64>>,
    pub zoom_min: Option<Option<f64>>,
    pub zoom_max: Option<Option<f64>>,
    pub zoom_key: Option<Option<ZoomKey>>,
    pub zoom_friction: Option<f64>,
    pub rolling_mode: Option<RollingMode>,
    pub settle_delay_ms: Option<f64>,
    pub start: Option<f64>,
    pub end: Option<f64>,
}

/// Keys accepted by [`RangeOptionsPatch::from_json_str`].
pub const RANGE_OPTION_KEYS: [&str; 14] = [
    "direction",
    "rtl",
    "moveable",
    "zoomable",
    "min",
    "max",
    "zoomMin",
    "zoomMax",
    "zoomKey",
    "zoomFriction",
    "rollingMode",
    "settleDelay",
    "start",
    "end",
];

impl RangeOptionsPatch {
    #[must_use]
    pub fn window(start: Option<f64>, end: Option<f64>) -> Self {
        Self {
            start,
            end,
            ..Self::default()
        }
    }

    /// Returns `true` when the patch carries a range request.
    #[must_use]
    pub fn has_window(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Parses a JSON object of recognized option keys.
    ///
    /// Keys use the widget's camelCase names; snake_case spellings are accepted
    /// too. Unknown keys are rejected. Instants may be epoch milliseconds or
    /// RFC 3339 strings.
    pub fn from_json_str(input: &str) -> RangeResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| RangeError::InvalidOptions(format!("failed to parse options json: {e}")))?;
        let Value::Object(object) = value else {
            return Err(RangeError::InvalidOptions(
                "options json must be an object".to_owned(),
            ));
        };
        Self::from_json_object(&object)
    }

    pub fn from_json_object(object: &Map<String, Value>) -> RangeResult<Self> {
        let mut patch = Self::default();
        for (key, value) in object {
            match canonical_key(key) {
                Some("direction") => {
                    let name = expect_str(key, value)?;
                    patch.direction = Some(name.parse::<Direction>()?);
                }
                Some("rtl") => patch.rtl = Some(expect_bool(key, value)?),
                Some("moveable") => patch.moveable = Some(expect_bool(key, value)?),
                Some("zoomable") => patch.zoomable = Some(expect_bool(key, value)?),
                Some("min") => patch.min = Some(decode_nullable_instant(key, value)?),
                Some("max") => patch.max = Some(decode_nullable_instant(key, value)?),
                Some("zoomMin") => patch.zoom_min = Some(decode_nullable_number(key, value)?),
                Some("zoomMax") => patch.zoom_max = Some(decode_nullable_number(key, value)?),
                Some("zoomKey") => patch.zoom_key = Some(decode_zoom_key(key, value)?),
                Some("zoomFriction") => patch.zoom_friction = Some(expect_number(key, value)?),
                Some("rollingMode") => {
                    let rolling_mode = serde_json::from_value::<RollingMode>(value.clone())
                        .map_err(|e| {
                            RangeError::InvalidOptions(format!("invalid rollingMode: {e}"))
                        })?;
                    patch.rolling_mode = Some(rolling_mode);
                }
                Some("settleDelay") => patch.settle_delay_ms = Some(expect_number(key, value)?),
                Some("start") => patch.start = decode_nullable_instant(key, value)?,
                Some("end") => patch.end = decode_nullable_instant(key, value)?,
                _ => {
                    return Err(RangeError::InvalidOptions(format!(
                        "unknown option \"{key}\", choose from: {}",
                        RANGE_OPTION_KEYS.join(", ")
                    )));
                }
            }
        }
        Ok(patch)
    }
}

fn canonical_key(key: &str) -> Option<&'static str> {
    let canonical = match key {
        "zoom_min" => "zoomMin",
        "zoom_max" => "zoomMax",
        "zoom_key" => "zoomKey",
        "zoom_friction" => "zoomFriction",
        "rolling_mode" => "rollingMode",
        "settle_delay" | "settle_delay_ms" | "settleDelayMs" => "settleDelay",
        other => other,
    };
    RANGE_OPTION_KEYS
        .iter()
        .copied()
        .find(|known| *known == canonical)
}

fn expect_bool(key: &str, value: &Value) -> RangeResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| RangeError::InvalidOptions(format!("option \"{key}\" must be a boolean")))
}

fn expect_str<'a>(key: &str, value: &'a Value) -> RangeResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| RangeError::InvalidOptions(format!("option \"{key}\" must be a string")))
}

fn expect_number(key: &str, value: &Value) -> RangeResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| RangeError::InvalidOptions(format!("option \"{key}\" must be a number")))
}

fn decode_nullable_number(key: &str, value: &Value) -> RangeResult<Option<f64>> {
    if value.is_null() {
        return Ok(None);
    }
    expect_number(key, value).map(Some)
}

fn decode_nullable_instant(key: &str, value: &Value) -> RangeResult<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => number.as_f64().map(Some).ok_or_else(|| {
            RangeError::InvalidOptions(format!("option \"{key}\" is not a representable instant"))
        }),
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .map(|time| Some(datetime_to_millis(time.with_timezone(&Utc))))
            .map_err(|e| {
                RangeError::InvalidOptions(format!(
                    "option \"{key}\" must be epoch milliseconds or an RFC 3339 date: {e}"
                ))
            }),
        _ => Err(RangeError::InvalidOptions(format!(
            "option \"{key}\" must be epoch milliseconds or an RFC 3339 date"
        ))),
    }
}

fn decode_zoom_key(key: &str, value: &Value) -> RangeResult<Option<ZoomKey>> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) if text.is_empty() => Ok(None),
        Value::String(_) => serde_json::from_value::<ZoomKey>(value.clone())
            .map(Some)
            .map_err(|e| RangeError::InvalidOptions(format!("invalid \"{key}\": {e}"))),
        _ => Err(RangeError::InvalidOptions(format!(
            "option \"{key}\" must be a modifier key name"
        ))),
    }
}
