use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

use super::field::TrackedField;
use super::value::TrackedValue;
use crate::error::ApiResult;

/// A partial update for one record type.
///
/// Absent fields (`None`) are not supplied. Nullable fields use
/// `Option<Option<T>>` so that `Some(None)` clears the column.
pub trait RecordPatch: Validate + Clone + Default + Send + Sync + 'static {
    type Field: TrackedField;

    /// Supplied fields with their proposed values, in `Field::ALL` order.
    fn proposed_values(&self) -> Vec<(Self::Field, TrackedValue)>;

    /// Builds a patch that supplies exactly one field.
    fn from_field(field: Self::Field, value: TrackedValue) -> ApiResult<Self>;
}

/// Distinguishes an explicit `null` from a missing key:
/// missing stays `None`, `null` becomes `Some(None)`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

pub(crate) fn check_non_negative(
    value: Option<Decimal>,
    code: &'static str,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.is_sign_negative() && !v.is_zero() => Err(ValidationError::new(code)),
        _ => Ok(()),
    }
}

pub(crate) fn check_max_len(
    value: Option<&str>,
    max: usize,
    code: &'static str,
) -> Result<(), ValidationError> {
    match value {
        Some(s) if s.chars().count() > max => Err(ValidationError::new(code)),
        _ => Ok(()),
    }
}

pub(crate) fn check_count(
    value: Option<i32>,
    max: i32,
    code: &'static str,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if !(0..=max).contains(&v) => Err(ValidationError::new(code)),
        _ => Ok(()),
    }
}

pub(crate) fn push_supplied<F>(
    values: &mut Vec<(F, TrackedValue)>,
    field: F,
    value: Option<TrackedValue>,
) {
    if let Some(value) = value {
        values.push((field, value));
    }
}

pub(crate) fn required<T>(value: Option<T>, field: &str) -> ApiResult<T> {
    value.ok_or_else(|| crate::error::ApiError::ValidationError(format!("{field} cannot be cleared")))
}
