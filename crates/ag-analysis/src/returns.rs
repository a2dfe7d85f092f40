//! Return statistics estimator.
//!
//! Turns a price series into daily log returns `r_i = ln(p_i / p_{i-1})` and
//! summarises them as a drift (arithmetic mean) and a volatility (sample
//! standard deviation, `N − 1` denominator).

use ag_core::{ensure, DriftConvention, Price, PriceSeries, Real, Result, Size, Volatility};
use ag_math::Statistics;
use ag_methods::SimulationParameters;
use serde::Serialize;
use tracing::debug;

/// Drift and volatility of a return series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnStatistics {
    /// Mean log return per period.
    pub drift: Real,
    /// Sample standard deviation of log returns per period.
    pub volatility: Volatility,
    /// Number of returns the estimate is based on.
    pub observations: Size,
}

impl ReturnStatistics {
    /// Rescale to `periods` per year: `μ·P` and `σ·√P`.
    pub fn annualized(&self, periods: Size) -> Self {
        let p = periods as Real;
        Self {
            drift: self.drift * p,
            volatility: self.volatility * p.sqrt(),
            observations: self.observations,
        }
    }

    /// The drift handed to the simulator under `convention`.
    pub fn simulation_drift(&self, convention: DriftConvention) -> Real {
        match convention {
            DriftConvention::LogMean => self.drift,
            DriftConvention::ItoCompensated => {
                self.drift + 0.5 * self.volatility * self.volatility
            }
        }
    }

    /// Simulation parameters for a forecast from `start_price`.
    ///
    /// # Errors
    /// [`InvalidParameter`](ag_core::Error::InvalidParameter) as for
    /// [`SimulationParameters::new`].
    pub fn to_parameters(
        &self,
        start_price: Price,
        num_days: Size,
        num_paths: Size,
        convention: DriftConvention,
    ) -> Result<SimulationParameters> {
        SimulationParameters::new(
            self.simulation_drift(convention),
            self.volatility,
            start_price,
            num_days,
            num_paths,
        )
    }
}

/// Log returns of consecutive prices.
///
/// # Errors
/// [`InsufficientData`](ag_core::Error::InsufficientData) for fewer than two
/// prices; [`InvalidData`](ag_core::Error::InvalidData) for a price that is
/// not strictly positive and finite.
pub fn log_returns(prices: &[Price]) -> Result<Vec<Real>> {
    ensure!(
        prices.len() >= 2,
        InsufficientData,
        "need at least 2 prices, got {}",
        prices.len()
    );
    if let Some((i, p)) = prices
        .iter()
        .enumerate()
        .find(|(_, p)| !(p.is_finite() && **p > 0.0))
    {
        ag_core::fail!(InvalidData, "price at index {i} must be positive and finite, got {p}");
    }
    Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

/// Estimate drift and volatility from a bare price sequence.
///
/// # Errors
/// As [`log_returns`]; additionally
/// [`InsufficientData`](ag_core::Error::InsufficientData) when only one
/// return is available, since its sample deviation is undefined.
pub fn estimate_from_prices(prices: &[Price]) -> Result<ReturnStatistics> {
    let returns = log_returns(prices)?;
    let stats: Statistics = returns.iter().copied().collect();
    let (Some(drift), Some(volatility)) = (stats.mean(), stats.std_dev()) else {
        ag_core::fail!(
            InsufficientData,
            "need at least 2 returns for a sample deviation, got {}",
            returns.len()
        );
    };
    debug!(observations = returns.len(), drift, volatility, "estimated return statistics");
    Ok(ReturnStatistics {
        drift,
        volatility,
        observations: returns.len(),
    })
}

/// Estimate drift and volatility from a dated price series.
///
/// # Errors
/// As [`estimate_from_prices`].
pub fn estimate(series: &PriceSeries) -> Result<ReturnStatistics> {
    estimate_from_prices(&series.prices())
}
