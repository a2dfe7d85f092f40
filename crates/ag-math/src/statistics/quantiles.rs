//! Order-statistic quantiles.

use ag_core::{ensure, Real, Result};

/// Return a sorted copy of `data`.
///
/// NaN values compare as greater than every number and end up last.
pub fn sorted(data: &[Real]) -> Vec<Real> {
    let mut v = data.to_vec();
    v.sort_by(|a, b| a.total_cmp(b));
    v
}

/// Quantile of an already sorted sample by linear interpolation between the
/// two nearest order statistics (`h = (n − 1)·p`).
///
/// # Errors
/// [`InvalidParameter`](ag_core::Error::InvalidParameter) if `p ∉ [0, 1]`,
/// [`InsufficientData`](ag_core::Error::InsufficientData) if the sample is
/// empty.
pub fn quantile_sorted(sorted: &[Real], p: Real) -> Result<Real> {
    ensure!(
        (0.0..=1.0).contains(&p),
        InvalidParameter,
        "quantile level must be in [0, 1], got {p}"
    );
    ensure!(!sorted.is_empty(), InsufficientData, "quantile of an empty sample");

    let h = (sorted.len() - 1) as Real * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as Real;
    let (a, b) = (sorted[lo], sorted[hi]);
    // equal neighbours, infinite ones included, need no interpolation
    if frac == 0.0 || a == b {
        return Ok(a);
    }
    Ok(a + frac * (b - a))
}

/// Quantile of an unsorted sample.  Sorts a copy; prefer
/// [`quantile_sorted`] when several levels are needed.
pub fn quantile(data: &[Real], p: Real) -> Result<Real> {
    quantile_sorted(&sorted(data), p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ag_core::Error;
    use approx::assert_abs_diff_eq;

    #[test]
    fn interpolates_between_order_statistics() {
        let xs = [90.0, 95.0, 100.0, 105.0, 110.0];
        assert_abs_diff_eq!(quantile_sorted(&xs, 0.5).unwrap(), 100.0, epsilon = 1e-12);
        // h = 4 · 0.1 = 0.4 → 90 + 0.4 · 5
        assert_abs_diff_eq!(quantile_sorted(&xs, 0.1).unwrap(), 92.0, epsilon = 1e-12);
        assert_abs_diff_eq!(quantile_sorted(&xs, 0.9).unwrap(), 108.0, epsilon = 1e-12);
        assert_eq!(quantile_sorted(&xs, 0.0).unwrap(), 90.0);
        assert_eq!(quantile_sorted(&xs, 1.0).unwrap(), 110.0);
    }

    #[test]
    fn even_sample_median_is_midpoint() {
        assert_abs_diff_eq!(quantile(&[4.0, 1.0, 3.0, 2.0], 0.5).unwrap(), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn single_value_sample() {
        assert_eq!(quantile(&[7.0], 0.3).unwrap(), 7.0);
    }

    #[test]
    fn infinite_order_statistics() {
        let xs = [1.0, f64::INFINITY, f64::INFINITY];
        assert_eq!(quantile_sorted(&xs, 0.5).unwrap(), f64::INFINITY);
        assert_eq!(quantile_sorted(&xs, 0.75).unwrap(), f64::INFINITY);
        assert_eq!(quantile_sorted(&xs, 0.25).unwrap(), f64::INFINITY);
        assert_eq!(quantile_sorted(&xs, 0.0).unwrap(), 1.0);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(quantile(&[], 0.5), Err(Error::InsufficientData(_))));
        assert!(matches!(quantile(&[1.0], 1.5), Err(Error::InvalidParameter(_))));
        assert!(matches!(quantile(&[1.0], f64::NAN), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn sorted_puts_nan_last() {
        let s = sorted(&[3.0, f64::NAN, 1.0]);
        assert_eq!(&s[..2], &[1.0, 3.0]);
        assert!(s[2].is_nan());
    }
}
