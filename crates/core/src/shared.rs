//! Shared helpers for the toolbox core.
//!
//! Small numeric and time utilities used by more than one operation when shaping
//! result metadata.

use chrono::{SecondsFormat, Utc};

/// Rounds to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Entropy in bits for `length` independent draws from an alphabet of `alphabet_size`.
pub(crate) fn entropy_bits(length: usize, alphabet_size: usize) -> f64 {
    if alphabet_size == 0 {
        return 0.0;
    }
    length as f64 * (alphabet_size as f64).log2()
}

/// Relative change from `from` to `to` in percent, rounded to two decimals.
///
/// Returns `0.0` when `from` is zero.
pub(crate) fn percent_change(from: usize, to: usize) -> f64 {
    if from == 0 {
        return 0.0;
    }
    round2((to as f64 - from as f64) / from as f64 * 100.0)
}

/// Relative shrink from `from` to `to` in percent, rounded to two decimals.
///
/// Returns `0.0` when `from` is zero.
pub(crate) fn percent_decrease(from: usize, to: usize) -> f64 {
    if from == 0 {
        return 0.0;
    }
    round2((from as f64 - to as f64) / from as f64 * 100.0)
}

/// Current UTC time as RFC 3339 with millisecond precision, e.g. `2026-01-11T14:35:22.045Z`.
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(95.27104), 95.27);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(12.0), 12.0);
    }

    #[test]
    fn entropy_of_base64_alphabet_is_six_bits_per_draw() {
        assert_eq!(entropy_bits(10, 64), 60.0);
        assert_eq!(entropy_bits(10, 0), 0.0);
    }

    #[test]
    fn percent_change_handles_growth_shrink_and_zero() {
        assert_eq!(percent_change(12, 16), 33.33);
        assert_eq!(percent_change(16, 12), -25.0);
        assert_eq!(percent_change(0, 5), 0.0);
        assert_eq!(percent_decrease(16, 12), 25.0);
        assert_eq!(percent_decrease(0, 3), 0.0);
    }

    #[test]
    fn timestamp_is_utc_with_millis() {
        let ts = utc_timestamp();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
