use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwingSide {
    High,
    Low,
}

impl SwingSide {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

#[derive(Debug)]
pub enum SwingError {
    InvalidParameter {
        name: &'static str,
        value: i64,
        reason: &'static str,
    },
    InvalidDatetime(String),
    InvalidNumber(String),
    UnsupportedFormat(String),
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
    Polars(polars::error::PolarsError),
}

pub struct Const;

impl Const {
    pub const DEFAULT_STRENGTH: i64 = 5;
    pub const MIN_STRENGTH: i64 = 1;
}

impl Display for SwingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "invalid parameter {name}={value}: {reason}"),
            Self::InvalidDatetime(v) => write!(f, "invalid datetime: {v}"),
            Self::InvalidNumber(v) => write!(f, "invalid number: {v}"),
            Self::UnsupportedFormat(v) => write!(f, "unsupported file format: {v}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Csv(e) => write!(f, "csv error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
            Self::Yaml(e) => write!(f, "yaml error: {e}"),
            Self::Polars(e) => write!(f, "polars error: {e}"),
        }
    }
}

impl std::error::Error for SwingError {}

impl From<std::io::Error> for SwingError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for SwingError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<serde_json::Error> for SwingError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<serde_yaml::Error> for SwingError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}

impl From<polars::error::PolarsError> for SwingError {
    fn from(value: polars::error::PolarsError) -> Self {
        Self::Polars(value)
    }
}

/// 校验 strength 参数，必须 >= 1，返回可用于索引的窗口宽度。
pub(crate) fn validate_strength(strength: i64) -> Result<usize, SwingError> {
    if strength < Const::MIN_STRENGTH {
        return Err(SwingError::InvalidParameter {
            name: "strength",
            value: strength,
            reason: "strength must be greater than or equal to 1",
        });
    }
    usize::try_from(strength).map_err(|_| SwingError::InvalidParameter {
        name: "strength",
        value: strength,
        reason: "strength does not fit the platform index width",
    })
}
