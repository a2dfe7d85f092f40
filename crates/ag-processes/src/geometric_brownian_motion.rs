//! Geometric Brownian motion process.
//!
//! ```text
//! dS/S = μ dt + σ dW
//! ```
//!
//! Stepped with the exact log-normal transition rather than an Euler
//! scheme, so prices stay positive for any step size:
//!
//! ```text
//! S(t+Δt) = S(t) · exp((μ − σ²/2)·Δt + σ·√Δt·Z)
//! ```
//!
//! The `−σ²/2` term is the Itô correction: it makes `E[S(t+Δt)] = S(t)·e^{μΔt}`.
//! Over long horizons with a large `σ` the product can underflow to zero or
//! overflow to infinity; that is a property of the model and is not
//! clamped.

use crate::stochastic_process::StochasticProcess1D;
use ag_core::{ensure, Real, Result, Time};

/// Geometric Brownian motion with constant drift and volatility.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometricBrownianMotionProcess {
    x0: Real,
    mu: Real,
    sigma: Real,
}

impl GeometricBrownianMotionProcess {
    /// Create a new GBM process.
    ///
    /// # Arguments
    /// * `x0`: initial price (must be > 0)
    /// * `mu`: drift per unit time
    /// * `sigma`: volatility per square-root unit time (must be ≥ 0)
    ///
    /// # Errors
    /// [`InvalidParameter`](ag_core::Error::InvalidParameter) if `x0 ≤ 0`,
    /// `sigma < 0`, or any argument is not finite.
    pub fn new(x0: Real, mu: Real, sigma: Real) -> Result<Self> {
        ensure!(
            x0.is_finite() && x0 > 0.0,
            InvalidParameter,
            "initial value must be positive and finite, got {x0}"
        );
        ensure!(mu.is_finite(), InvalidParameter, "drift must be finite, got {mu}");
        ensure!(
            sigma.is_finite() && sigma >= 0.0,
            InvalidParameter,
            "volatility must be non-negative and finite, got {sigma}"
        );
        Ok(Self { x0, mu, sigma })
    }

    /// Drift `μ`.
    pub fn mu(&self) -> Real {
        self.mu
    }

    /// Volatility `σ`.
    pub fn sigma(&self) -> Real {
        self.sigma
    }

    /// Drift of `ln S`: `μ − σ²/2`.
    pub fn log_drift(&self) -> Real {
        self.mu - 0.5 * self.sigma * self.sigma
    }
}

impl StochasticProcess1D for GeometricBrownianMotionProcess {
    fn x0(&self) -> Real {
        self.x0
    }

    fn drift_1d(&self, _t: Time, x: Real) -> Real {
        self.mu * x
    }

    fn diffusion_1d(&self, _t: Time, x: Real) -> Real {
        self.sigma * x
    }

    /// Exact expectation: `x · exp(μ · dt)`.
    fn expectation_1d(&self, _t: Time, x: Real, dt: Time) -> Real {
        x * (self.mu * dt).exp()
    }

    /// Exact log-normal step.
    fn evolve_1d(&self, _t: Time, x: Real, dt: Time, dw: Real) -> Real {
        x * (self.log_drift() * dt + self.sigma * dt.sqrt() * dw).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ag_core::Error;
    use approx::assert_abs_diff_eq;

    #[test]
    fn gbm_drift_and_diffusion_proportional() {
        let p = GeometricBrownianMotionProcess::new(100.0, 0.05, 0.2).unwrap();
        assert_abs_diff_eq!(p.drift_1d(0.0, 200.0), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.diffusion_1d(0.0, 100.0), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_noise_step_applies_ito_correction() {
        let p = GeometricBrownianMotionProcess::new(100.0, 0.05, 0.2).unwrap();
        let x = p.evolve_1d(0.0, 100.0, 1.0, 0.0);
        assert_abs_diff_eq!(x, 100.0 * (0.05_f64 - 0.02).exp(), epsilon = 1e-10);
    }

    #[test]
    fn zero_volatility_step_is_deterministic_growth() {
        let p = GeometricBrownianMotionProcess::new(100.0, 0.01, 0.0).unwrap();
        for dw in [-3.0, 0.0, 2.5] {
            assert_abs_diff_eq!(
                p.evolve_1d(0.0, 100.0, 1.0, dw),
                p.expectation_1d(0.0, 100.0, 1.0),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn step_stays_positive_for_large_shocks() {
        let p = GeometricBrownianMotionProcess::new(1.0, 0.0, 2.0).unwrap();
        assert!(p.evolve_1d(0.0, 1.0, 1.0, -8.0) > 0.0);
    }

    #[test]
    fn rejects_invalid_parameters() {
        for (x0, mu, sigma) in [
            (0.0, 0.0, 0.1),
            (-1.0, 0.0, 0.1),
            (100.0, 0.0, -0.1),
            (100.0, f64::NAN, 0.1),
            (f64::INFINITY, 0.0, 0.1),
        ] {
            assert!(matches!(
                GeometricBrownianMotionProcess::new(x0, mu, sigma),
                Err(Error::InvalidParameter(_))
            ));
        }
    }
}
