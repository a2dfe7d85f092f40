//! Simulation parameters.

use ag_core::{ensure, Price, Real, Result, Size, Time, Volatility};
use ag_processes::GeometricBrownianMotionProcess;
use serde::Serialize;

/// Immutable inputs of one GBM simulation.
///
/// `drift` and `volatility` are expressed per unit of `time_step`.  With the
/// default `time_step = 1.0` they are daily figures and each simulated step
/// is one trading day.  Annualised figures work the same way with
/// `time_step = 1 / trading_days_per_year`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationParameters {
    drift: Real,
    volatility: Volatility,
    start_price: Price,
    num_days: Size,
    num_paths: Size,
    time_step: Time,
}

impl SimulationParameters {
    /// Build and validate a parameter set with a unit time step.
    ///
    /// # Errors
    /// [`InvalidParameter`](ag_core::Error::InvalidParameter) if
    /// `num_paths == 0`, `num_days == 0`, `start_price <= 0`,
    /// `volatility < 0`, or a value is not finite.
    pub fn new(
        drift: Real,
        volatility: Volatility,
        start_price: Price,
        num_days: Size,
        num_paths: Size,
    ) -> Result<Self> {
        let params = Self {
            drift,
            volatility,
            start_price,
            num_days,
            num_paths,
            time_step: 1.0,
        };
        params.validate()?;
        Ok(params)
    }

    /// Replace the time step (the length of one simulated day in the units
    /// of `drift` and `volatility`).
    ///
    /// # Errors
    /// [`InvalidParameter`](ag_core::Error::InvalidParameter) unless
    /// `time_step` is positive and finite.
    pub fn with_time_step(self, time_step: Time) -> Result<Self> {
        let params = Self { time_step, ..self };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.num_paths > 0, InvalidParameter, "num_paths must be positive");
        ensure!(self.num_days > 0, InvalidParameter, "num_days must be positive");
        ensure!(
            self.start_price.is_finite() && self.start_price > 0.0,
            InvalidParameter,
            "start_price must be positive and finite, got {}",
            self.start_price
        );
        ensure!(
            self.volatility.is_finite() && self.volatility >= 0.0,
            InvalidParameter,
            "volatility must be non-negative and finite, got {}",
            self.volatility
        );
        ensure!(
            self.drift.is_finite(),
            InvalidParameter,
            "drift must be finite, got {}",
            self.drift
        );
        ensure!(
            self.time_step.is_finite() && self.time_step > 0.0,
            InvalidParameter,
            "time_step must be positive and finite, got {}",
            self.time_step
        );
        Ok(())
    }

    /// Drift per unit time.
    pub fn drift(&self) -> Real {
        self.drift
    }

    /// Volatility per square-root unit time.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }

    /// Price on day 0 of every path.
    pub fn start_price(&self) -> Price {
        self.start_price
    }

    /// Number of simulated steps per path.
    pub fn num_days(&self) -> Size {
        self.num_days
    }

    /// Number of simulated paths.
    pub fn num_paths(&self) -> Size {
        self.num_paths
    }

    /// Length of one step.
    pub fn time_step(&self) -> Time {
        self.time_step
    }

    /// Total simulated time, `num_days · time_step`.
    pub fn horizon(&self) -> Time {
        self.num_days as Real * self.time_step
    }

    /// The GBM process these parameters describe.
    pub fn process(&self) -> Result<GeometricBrownianMotionProcess> {
        GeometricBrownianMotionProcess::new(self.start_price, self.drift, self.volatility)
    }
}
