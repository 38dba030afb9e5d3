/// Decimal places used when presenting expected frequencies.
pub const EXPECTED_DECIMALS: i32 = 2;
/// Decimal places used when presenting contributions and the statistic.
pub const CONTRIBUTION_DECIMALS: i32 = 4;
/// Decimal places used when presenting the p-value.
pub const P_VALUE_DECIMALS: i32 = 6;

/// Rounds `value` to `decimals` decimal places, halves away from zero.
///
/// # Examples
///
/// ```
/// # use crosstab_stats::rounding::round_to;
/// assert_eq!(round_to(10.105_263, 2), 10.11);
/// assert_eq!(round_to(0.001_096_5, 4), 0.0011);
/// assert_eq!(round_to(-1.25, 1), -1.3);
/// ```
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_zero_decimals() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(2.4, 0), 2.0);
    }

    #[test]
    fn test_round_to_keeps_non_finite() {
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(f64::INFINITY, 2), f64::INFINITY);
    }
}
