use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Value of a tracked field as seen by the change detector.
///
/// Two values of the same variant compare by value. `Number` and `Integer`
/// compare numerically. Any other mix of variants falls back to comparing
/// the log representation, where `Null` renders as the empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TrackedValue {
    Null,
    Number(Decimal),
    Integer(i64),
    Text(String),
    Boolean(bool),
    Enum(String),
}

impl TrackedValue {
    pub fn enumeration<E: fmt::Display>(value: &E) -> Self {
        TrackedValue::Enum(value.to_string())
    }

    pub fn optional_enum<E: fmt::Display>(value: Option<&E>) -> Self {
        value.map_or(TrackedValue::Null, TrackedValue::enumeration)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TrackedValue::Null)
    }

    /// Whether two values denote the same field content.
    pub fn same_as(&self, other: &TrackedValue) -> bool {
        use TrackedValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Number(a), Number(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Number(a), Integer(b)) | (Integer(b), Number(a)) => *a == Decimal::from(*b),
            (Text(a), Text(b)) => a == b,
            (Boolean(a), Boolean(b)) => a == b,
            (Enum(a), Enum(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }

    /// Text stored in the update log; `None` for `Null`.
    pub fn to_log_string(&self) -> Option<String> {
        match self {
            TrackedValue::Null => None,
            TrackedValue::Number(d) => Some(d.normalize().to_string()),
            TrackedValue::Integer(i) => Some(i.to_string()),
            TrackedValue::Text(s) | TrackedValue::Enum(s) => Some(s.clone()),
            TrackedValue::Boolean(b) => Some(b.to_string()),
        }
    }

    pub fn as_decimal(&self) -> ApiResult<Option<Decimal>> {
        match self {
            TrackedValue::Null => Ok(None),
            TrackedValue::Number(d) => Ok(Some(*d)),
            TrackedValue::Integer(i) => Ok(Some(Decimal::from(*i))),
            TrackedValue::Text(s) => Decimal::from_str(s)
                .map(Some)
                .map_err(|_| ApiError::ValidationError(format!("Expected a number, got '{s}'"))),
            other => Err(shape_error("a number", other)),
        }
    }

    pub fn as_i32(&self) -> ApiResult<Option<i32>> {
        match self {
            TrackedValue::Null => Ok(None),
            TrackedValue::Integer(i) => i32::try_from(*i)
                .map(Some)
                .map_err(|_| ApiError::ValidationError(format!("Integer out of range: {i}"))),
            TrackedValue::Number(d) if d.fract().is_zero() => d
                .to_i32()
                .map(Some)
                .ok_or_else(|| ApiError::ValidationError(format!("Integer out of range: {d}"))),
            TrackedValue::Text(s) => s
                .parse::<i32>()
                .map(Some)
                .map_err(|_| ApiError::ValidationError(format!("Expected an integer, got '{s}'"))),
            other => Err(shape_error("an integer", other)),
        }
    }

    pub fn as_bool(&self) -> ApiResult<bool> {
        match self {
            TrackedValue::Boolean(b) => Ok(*b),
            TrackedValue::Text(s) => s
                .parse::<bool>()
                .map_err(|_| ApiError::ValidationError(format!("Expected a boolean, got '{s}'"))),
            other => Err(shape_error("a boolean", other)),
        }
    }

    pub fn as_text(&self) -> ApiResult<Option<String>> {
        match self {
            TrackedValue::Null => Ok(None),
            TrackedValue::Text(s) | TrackedValue::Enum(s) => Ok(Some(s.clone())),
            other => Err(shape_error("text", other)),
        }
    }

    pub fn as_uuid(&self) -> ApiResult<Option<Uuid>> {
        match self.as_text()? {
            None => Ok(None),
            Some(s) => Uuid::parse_str(&s)
                .map(Some)
                .map_err(|_| ApiError::ValidationError(format!("Expected a uuid, got '{s}'"))),
        }
    }

    pub fn parse_enum<E>(&self) -> ApiResult<Option<E>>
    where
        E: FromStr<Err = ApiError>,
    {
        match self.as_text()? {
            None => Ok(None),
            Some(s) => s.parse::<E>().map(Some),
        }
    }
}

fn shape_error(expected: &str, got: &TrackedValue) -> ApiError {
    ApiError::ValidationError(format!("Expected {expected}, got {got:?}"))
}

impl fmt::Display for TrackedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_log_string().as_deref().unwrap_or(""))
    }
}

impl From<bool> for TrackedValue {
    fn from(value: bool) -> Self {
        TrackedValue::Boolean(value)
    }
}

impl From<i32> for TrackedValue {
    fn from(value: i32) -> Self {
        TrackedValue::Integer(value as i64)
    }
}

impl From<i64> for TrackedValue {
    fn from(value: i64) -> Self {
        TrackedValue::Integer(value)
    }
}

impl From<Decimal> for TrackedValue {
    fn from(value: Decimal) -> Self {
        TrackedValue::Number(value)
    }
}

impl From<String> for TrackedValue {
    fn from(value: String) -> Self {
        TrackedValue::Text(value)
    }
}

impl From<&str> for TrackedValue {
    fn from(value: &str) -> Self {
        TrackedValue::Text(value.to_string())
    }
}

impl From<Uuid> for TrackedValue {
    fn from(value: Uuid) -> Self {
        TrackedValue::Text(value.to_string())
    }
}

impl<T: Into<TrackedValue>> From<Option<T>> for TrackedValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(TrackedValue::Null)
    }
}
