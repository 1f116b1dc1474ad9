use thiserror::Error;

pub type RangeResult<T> = Result<T, RangeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("invalid range: start={start}, end={end}")]
    InvalidRange { start: f64, end: f64 },

    #[error("unknown direction \"{0}\", choose \"horizontal\" or \"vertical\"")]
    InvalidDirection(String),

    #[error("unknown easing function \"{name}\", choose from: {supported}")]
    UnknownEasingFunction { name: String, supported: String },

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}
