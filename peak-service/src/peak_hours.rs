use usage_core::PeakHours;

use crate::error::ServiceError;

pub const MISSING: &str = "Array input is missing";
pub const INVALID_FORMAT: &str = "Invalid array format. Use list syntax like [1,2,3]";
pub const NOT_INTEGERS: &str = "Array must contain only integers";

/// Parse a peak-hour list literal such as `[7, 8, 9, 17, 18, 19]`.
///
/// Values are not range-checked; duplicates collapse.
pub fn parse_peak_hours(literal: Option<&str>) -> Result<PeakHours, ServiceError> {
    let literal = match literal.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Err(ServiceError::input(MISSING)),
    };

    let inner = literal
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| ServiceError::input(INVALID_FORMAT))?;

    // Allow a single trailing comma, as list literals do.
    let inner = inner.trim();
    let inner = inner.strip_suffix(',').unwrap_or(inner);
    let normalized = format!("[{inner}]");

    let values: Vec<serde_json::Value> =
        serde_json::from_str(&normalized).map_err(|_| ServiceError::input(INVALID_FORMAT))?;

    values
        .iter()
        .map(|v| v.as_i64().ok_or_else(|| ServiceError::input(NOT_INTEGERS)))
        .collect()
}
