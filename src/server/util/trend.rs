/// Percentage change from `previous` to `current`.
///
/// Returns 100 when growing from zero and 0 when both windows are empty.
pub fn compute_trend(current: i64, previous: i64) -> f64 {
    if previous > 0 {
        (current - previous) as f64 / previous as f64 * 100.0
    } else if current > 0 {
        100.0
    } else {
        0.0
    }
}

/// Rounds to one decimal place for presentation.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
