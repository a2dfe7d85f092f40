//! Run configuration.
//!
//! [`ForecastConfig`] collects every knob of a forecasting run.  It is plain
//! data: deserialised from JSON by the CLI (missing fields take their
//! defaults), overridden by command-line flags, then validated once before
//! the pipeline starts.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::{ensure, Rate, Real, Size};

/// How the historical mean log return becomes the simulator's drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftConvention {
    /// Drift is the mean daily log return as estimated.  With the Itô term
    /// the simulated median log growth is `mean - vol²/2` per day.
    #[default]
    LogMean,
    /// Drift is `mean + vol²/2`, so the simulated median log growth per day
    /// equals the historical mean log return.
    ItoCompensated,
}

/// Configuration of one forecasting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of simulated paths.
    pub num_paths: Size,
    /// Forecast horizon in trading days.
    pub horizon_days: Size,
    /// Two-sided confidence level of the reported price interval.
    pub interval_confidence: Real,
    /// Confidence levels at which VaR and CVaR are reported.
    pub var_levels: Vec<Real>,
    /// Gain thresholds `k` for `P(S_T > S_0 (1 + k))`.
    pub gain_thresholds: Vec<Real>,
    /// Quantile levels of the per-day percentile bands.
    pub band_levels: Vec<Real>,
    /// Trading days per year, used for annualised metrics.
    pub trading_days_per_year: Size,
    /// Annual risk-free rate used by the Sharpe ratio.
    pub risk_free_rate: Rate,
    /// Master seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Generate paths on the rayon thread pool.
    pub parallel: bool,
    /// Drift convention.
    pub drift_convention: DriftConvention,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            num_paths: 10_000,
            horizon_days: 252,
            interval_confidence: 0.90,
            var_levels: vec![0.95, 0.99],
            gain_thresholds: vec![0.10, 0.20, 0.30],
            band_levels: vec![0.05, 0.20, 0.50, 0.80, 0.95],
            trading_days_per_year: 252,
            risk_free_rate: 0.0,
            seed: None,
            parallel: true,
            drift_convention: DriftConvention::LogMean,
        }
    }
}

impl ForecastConfig {
    /// Check every field against its valid range.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`](crate::Error::InvalidParameter) naming the
    /// first offending field.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.num_paths > 0, InvalidParameter, "num_paths must be positive");
        ensure!(
            self.horizon_days > 0,
            InvalidParameter,
            "horizon_days must be positive"
        );
        ensure!(
            self.trading_days_per_year > 0,
            InvalidParameter,
            "trading_days_per_year must be positive"
        );
        ensure!(
            is_open_unit(self.interval_confidence),
            InvalidParameter,
            "interval_confidence must be in (0, 1), got {}",
            self.interval_confidence
        );
        for &c in &self.var_levels {
            ensure!(
                is_open_unit(c),
                InvalidParameter,
                "var level must be in (0, 1), got {c}"
            );
        }
        for &p in &self.band_levels {
            ensure!(
                (0.0..=1.0).contains(&p),
                InvalidParameter,
                "band level must be in [0, 1], got {p}"
            );
        }
        for &k in &self.gain_thresholds {
            ensure!(
                k.is_finite() && k > -1.0,
                InvalidParameter,
                "gain threshold must be finite and above -1, got {k}"
            );
        }
        ensure!(
            self.risk_free_rate.is_finite(),
            InvalidParameter,
            "risk_free_rate must be finite"
        );
        Ok(())
    }
}

fn is_open_unit(x: Real) -> bool {
    x > 0.0 && x < 1.0
}
