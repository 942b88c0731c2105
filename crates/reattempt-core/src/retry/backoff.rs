//! Exponential backoff calculation

/// Calculate the delay before a retried attempt
///
/// The delay is `base_delay × 2^(attempt - 1)`, rounded to a whole number of
/// time units. Attempts at or below 1 return the base delay unscaled. A
/// negative or NaN base delay yields 0 and results too large for `u64`
/// saturate at `u64::MAX`.
///
/// # Example
///
/// ```rust
/// use reattempt_core::retry::backed_off_delay;
///
/// assert_eq!(backed_off_delay(1.0, 0), 1);
/// assert_eq!(backed_off_delay(1.0, 1), 1);
/// assert_eq!(backed_off_delay(1.0, 2), 2);
/// assert_eq!(backed_off_delay(1.0, 3), 4);
/// assert_eq!(backed_off_delay(5.0, 4), 40);
/// ```
pub fn backed_off_delay(base_delay: f64, attempt: i64) -> u64 {
    let exponent = attempt.saturating_sub(1).clamp(0, i32::MAX as i64) as i32;
    let delay = (base_delay * 2f64.powi(exponent)).round();

    // `as` saturates: NaN and negatives become 0, +inf and overflow become u64::MAX
    if delay.is_nan() {
        0
    } else {
        delay as u64
    }
}
