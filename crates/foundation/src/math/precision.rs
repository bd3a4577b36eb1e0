//! Precision policies.
//!
//! This module is intentionally small and conservative. It provides:
//! - A deterministic float ordering (`stable_total_cmp_f64`) for sorting.
//! - Fixed-decimal rounding used by the weight engine.
//! - Sign helpers that treat zero as "no direction".

use core::cmp::Ordering;

/// Canonicalize a floating-point value for deterministic ordering.
///
/// Rules:
/// - `-0.0` becomes `0.0`
/// - all NaNs become a single canonical NaN
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        // Handles +0.0 and -0.0.
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

/// Deterministic total ordering for floats.
///
/// Prefer this any time you sort floats or use them in ordered keys.
pub fn stable_total_cmp_f64(a: f64, b: f64) -> Ordering {
    canonical_f64(a).total_cmp(&canonical_f64(b))
}

/// Rounds `v` to `decimals` places after the point (half away from zero).
///
/// When `v * 10^decimals` is not representable, `v` is returned unchanged.
pub fn round_to_decimals(v: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(i32::MAX as u32) as i32);
    let scaled = v * factor;
    if !scaled.is_finite() {
        return v;
    }
    scaled.round() / factor
}

/// Like `f64::signum`, but zero (either sign) and NaN map to `0.0`.
pub fn sign_or_zero(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{canonical_f64, round_to_decimals, sign_or_zero, stable_total_cmp_f64};
    use core::cmp::Ordering;

    #[test]
    fn canonicalizes_negative_zero() {
        assert_eq!(canonical_f64(-0.0), 0.0);
        assert_eq!(canonical_f64(0.0), 0.0);
    }

    #[test]
    fn stable_cmp_is_total_and_deterministic() {
        assert_eq!(stable_total_cmp_f64(1.0, 2.0), Ordering::Less);
        assert_eq!(stable_total_cmp_f64(-0.0, 0.0), Ordering::Equal);
        assert_eq!(stable_total_cmp_f64(f64::NAN, f64::NAN), Ordering::Equal);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_to_decimals(33.333_333, 2), 33.33);
        assert_eq!(round_to_decimals(66.666_666, 2), 66.67);
        assert_eq!(round_to_decimals(100.0, 2), 100.0);
    }

    #[test]
    fn unrepresentable_scale_leaves_value_alone() {
        assert_eq!(round_to_decimals(33.333_333, 400), 33.333_333);
        assert_eq!(round_to_decimals(12.5, u32::MAX), 12.5);
        assert!(round_to_decimals(f64::NAN, 2).is_nan());
    }

    #[test]
    fn sign_treats_zero_and_nan_as_no_direction() {
        assert_eq!(sign_or_zero(100.0), 1.0);
        assert_eq!(sign_or_zero(-3.0), -1.0);
        assert_eq!(sign_or_zero(0.0), 0.0);
        assert_eq!(sign_or_zero(-0.0), 0.0);
        assert_eq!(sign_or_zero(f64::NAN), 0.0);
    }
}
