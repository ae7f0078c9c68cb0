//! Return rate arithmetic
//!
//! Used for per-day realized returns and the cumulative return against the seed

/// Percentage change from `previous` to `current`
///
/// # Arguments
/// * `current` - Value at the end of the period
/// * `previous` - Baseline value at the start of the period
///
/// # Returns
/// * `f64` - Return in percent (e.g., 1.5 for +1.5%), or 0.0 when the baseline is not positive
pub fn return_rate(current: f64, previous: f64) -> f64 {
    if previous <= 0.0 {
        return 0.0;
    }

    (current - previous) / previous * 100.0
}

/// Cumulative return of `current` measured against the seed value
///
/// Always anchored to the configured seed, never to a chained baseline.
pub fn total_return_rate(current: f64, seed: f64) -> f64 {
    return_rate(current, seed)
}
