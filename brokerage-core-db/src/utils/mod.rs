use brokerage_core_api::{ApiError, ApiResult};
use heapless::String as HeaplessString;

/// Copies `value` into a bounded string, rejecting input longer than `N` bytes.
pub fn bounded_string<const N: usize>(value: &str, field: &str) -> ApiResult<HeaplessString<N>> {
    HeaplessString::try_from(value).map_err(|_| {
        ApiError::ValidationError(format!("Value for '{field}' is too long (max {N} chars)"))
    })
}

pub fn optional_bounded_string<const N: usize>(
    value: Option<&str>,
    field: &str,
) -> ApiResult<Option<HeaplessString<N>>> {
    value.map(|v| bounded_string(v, field)).transpose()
}

/// Copies as many whole characters of `value` as fit into `N` bytes.
pub fn truncated_string<const N: usize>(value: &str) -> HeaplessString<N> {
    let mut out = HeaplessString::new();
    for c in value.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
