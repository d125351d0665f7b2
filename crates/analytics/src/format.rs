//! Axis-label formatters for charts and tables built on top of the analytics.

/// `12.3` -> `"12%"`, for values already expressed in percent.
pub fn to_percent(value: f64) -> String {
    format!("{value:.0}%")
}

/// `0.123` -> `"12%"`, for fractional values.
pub fn increase_percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

/// `2.6` -> `"3x"`.
pub fn to_ratio(value: f64) -> String {
    format!("{value:.0}x")
}
