//! Sample statistics.
//!
//! * [`Statistics`]: an incremental accumulator for mean, variance, min and
//!   max, updated with West's weighted form of Welford's algorithm so that
//!   small log returns around a small mean do not lose precision.
//! * [`quantile_sorted`] / [`quantile`]: linear order-statistic
//!   interpolation (`h = (n − 1)·p`).
//! * [`Moments`]: two-pass central moments for skewness and kurtosis.

mod quantiles;

pub use quantiles::{quantile, quantile_sorted, sorted};

use ag_core::Real;

/// Incremental statistics accumulator.
#[derive(Debug, Clone)]
pub struct Statistics {
    count: usize,
    sum_w: Real,
    mean: Real,
    m2: Real,
    min: Real,
    max: Real,
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Real> for Statistics {
    fn from_iter<I: IntoIterator<Item = Real>>(iter: I) -> Self {
        let mut s = Self::new();
        s.extend(iter);
        s
    }
}

impl Extend<Real> for Statistics {
    fn extend<I: IntoIterator<Item = Real>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl Statistics {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            sum_w: 0.0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Add a single sample with weight 1.
    pub fn add(&mut self, x: Real) {
        self.add_weighted(x, 1.0);
    }

    /// Add a weighted sample.
    pub fn add_weighted(&mut self, x: Real, weight: Real) {
        self.count += 1;
        self.sum_w += weight;
        self.min = self.min.min(x);
        self.max = self.max.max(x);
        if x.is_infinite() || self.mean.is_infinite() {
            // an infinite sample pins the mean; opposite infinities give NaN
            self.mean += x;
            self.m2 = Real::INFINITY;
            return;
        }
        let delta = x - self.mean;
        self.mean += delta * weight / self.sum_w;
        self.m2 += weight * delta * (x - self.mean);
    }

    /// Number of samples.
    pub fn samples(&self) -> usize {
        self.count
    }

    /// Weighted mean.  `None` if no samples have been added.
    pub fn mean(&self) -> Option<Real> {
        (self.sum_w > 0.0).then_some(self.mean)
    }

    /// Bessel-corrected variance.  `None` for fewer than 2 samples.
    pub fn variance(&self) -> Option<Real> {
        if self.sum_w == 0.0 || self.count < 2 {
            return None;
        }
        let n = self.count as Real;
        Some(self.m2 / self.sum_w * n / (n - 1.0))
    }

    /// Sample standard deviation.  `None` for fewer than 2 samples.
    pub fn std_dev(&self) -> Option<Real> {
        self.variance().map(Real::sqrt)
    }

    /// Standard error of the mean.  `None` for fewer than 2 samples.
    pub fn error_estimate(&self) -> Option<Real> {
        self.variance().map(|v| (v / self.count as Real).sqrt())
    }

    /// Minimum sample value.  `None` if no samples have been added.
    pub fn minimum(&self) -> Option<Real> {
        (self.count > 0).then_some(self.min)
    }

    /// Maximum sample value.  `None` if no samples have been added.
    pub fn maximum(&self) -> Option<Real> {
        (self.count > 0).then_some(self.max)
    }
}

/// Population central moments of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    /// Number of samples.
    pub n: usize,
    /// Arithmetic mean.
    pub mean: Real,
    /// Second central moment (biased variance).
    pub m2: Real,
    /// Third central moment.
    pub m3: Real,
    /// Fourth central moment.
    pub m4: Real,
}

impl Moments {
    /// Two-pass central moments.  `None` for an empty sample.
    pub fn of(data: &[Real]) -> Option<Self> {
        if data.is_empty() {
            return None;
        }
        let n = data.len() as Real;
        let mean = data.iter().sum::<Real>() / n;
        let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
        for &x in data {
            let d = x - mean;
            let d2 = d * d;
            m2 += d2;
            m3 += d2 * d;
            m4 += d2 * d2;
        }
        Some(Self {
            n: data.len(),
            mean,
            m2: m2 / n,
            m3: m3 / n,
            m4: m4 / n,
        })
    }

    /// Fisher–Pearson coefficient of skewness `m3 / m2^{3/2}` (biased).
    ///
    /// Zero for a sample with no dispersion.
    pub fn skewness(&self) -> Real {
        if self.m2 == 0.0 {
            return 0.0;
        }
        self.m3 / self.m2.powf(1.5)
    }

    /// Excess kurtosis `m4 / m2² − 3` (biased, Fisher definition).
    ///
    /// Zero for a sample with no dispersion.
    pub fn excess_kurtosis(&self) -> Real {
        if self.m2 == 0.0 {
            return 0.0;
        }
        self.m4 / (self.m2 * self.m2) - 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn basic_statistics() {
        let s: Statistics = [1.0, 2.0, 3.0, 4.0, 5.0].into_iter().collect();
        assert_eq!(s.samples(), 5);
        assert_abs_diff_eq!(s.mean().unwrap(), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.variance().unwrap(), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(s.std_dev().unwrap(), 2.5_f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(s.error_estimate().unwrap(), (2.5_f64 / 5.0).sqrt(), epsilon = 1e-12);
        assert_eq!(s.minimum(), Some(1.0));
        assert_eq!(s.maximum(), Some(5.0));
    }

    #[test]
    fn empty_statistics() {
        let s = Statistics::new();
        assert!(s.mean().is_none());
        assert!(s.variance().is_none());
        assert!(s.minimum().is_none());
    }

    #[test]
    fn single_sample_has_no_variance() {
        let s: Statistics = [0.01].into_iter().collect();
        assert_eq!(s.mean(), Some(0.01));
        assert!(s.std_dev().is_none());
    }

    #[test]
    fn stable_for_large_offset() {
        // A naive sum-of-squares loses every digit here.
        let offset = 1e9;
        let s: Statistics = [offset + 4.0, offset + 7.0, offset + 13.0, offset + 16.0]
            .into_iter()
            .collect();
        assert_abs_diff_eq!(s.variance().unwrap(), 30.0, epsilon = 1e-6);
    }

    #[test]
    fn infinite_samples_keep_an_infinite_mean() {
        let s: Statistics = [1.0, f64::INFINITY, f64::INFINITY, 2.0].into_iter().collect();
        assert_eq!(s.mean(), Some(f64::INFINITY));
        assert_eq!(s.variance(), Some(f64::INFINITY));
        assert_eq!(s.minimum(), Some(1.0));
        assert_eq!(s.maximum(), Some(f64::INFINITY));

        let mixed: Statistics = [f64::INFINITY, f64::NEG_INFINITY].into_iter().collect();
        assert!(mixed.mean().unwrap().is_nan());
    }

    #[test]
    fn moments_of_symmetric_sample() {
        let m = Moments::of(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_abs_diff_eq!(m.mean, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.m2, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.skewness(), 0.0, epsilon = 1e-12);
        // m4 = (16 + 1 + 0 + 1 + 16) / 5 = 6.8 ; 6.8 / 4 - 3 = -1.3
        assert_abs_diff_eq!(m.excess_kurtosis(), -1.3, epsilon = 1e-12);
    }

    #[test]
    fn moments_of_skewed_sample() {
        let m = Moments::of(&[1.0, 1.0, 1.0, 10.0]).unwrap();
        assert!(m.skewness() > 1.0);
        assert!(Moments::of(&[]).is_none());
        assert_eq!(Moments::of(&[2.0, 2.0]).unwrap().skewness(), 0.0);
    }

    proptest! {
        #[test]
        fn accumulator_matches_two_pass(data in prop::collection::vec(-1e3..1e3f64, 2..200)) {
            let s: Statistics = data.iter().copied().collect();
            let m = Moments::of(&data).unwrap();
            let n = data.len() as f64;
            prop_assert!((s.mean().unwrap() - m.mean).abs() < 1e-9);
            let v = m.m2 * n / (n - 1.0);
            prop_assert!((s.variance().unwrap() - v).abs() <= 1e-9 * (1.0 + v));
        }
    }
}
