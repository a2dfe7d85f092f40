//! Closed-form log-normal forecast.
//!
//! Under GBM `ln S_T ~ N(ln S_0 + (μ − σ²/2)·T, σ²·T)`, so the quantities the
//! outcome analyzer estimates by simulation have exact counterparts.  They
//! serve as a benchmark for the Monte Carlo figures.

use ag_core::{ensure, Error, Price, Real, Result};
use ag_methods::SimulationParameters;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, LogNormal};

use crate::outcome::ConfidenceInterval;

/// Exact terminal-price statistics of a GBM forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogNormalForecast {
    /// `E[S_T] = S_0·e^{μT}`.
    pub mean: Price,
    /// `S_0·e^{(μ − σ²/2)T}`.
    pub median: Price,
    /// `P(S_T < S_0)`.
    pub prob_loss: Real,
    /// Equal-tailed interval of `S_T`.
    pub interval: ConfidenceInterval,
}

/// Log-normal terminal statistics for `params` at `confidence_level`.
///
/// # Errors
/// [`InvalidParameter`](ag_core::Error::InvalidParameter) unless
/// `0 < confidence_level < 1`.
pub fn lognormal_forecast(
    params: &SimulationParameters,
    confidence_level: Real,
) -> Result<LogNormalForecast> {
    ensure!(
        confidence_level > 0.0 && confidence_level < 1.0,
        InvalidParameter,
        "confidence level must be in (0, 1), got {confidence_level}"
    );
    let s0 = params.start_price();
    let sigma = params.volatility();
    let t = params.horizon();
    let m = (params.drift() - 0.5 * sigma * sigma) * t;
    let s = sigma * t.sqrt();
    let median = s0 * m.exp();
    let mean = s0 * (params.drift() * t).exp();

    if s == 0.0 {
        return Ok(LogNormalForecast {
            mean,
            median,
            prob_loss: if m < 0.0 { 1.0 } else { 0.0 },
            interval: ConfidenceInterval {
                level: confidence_level,
                lower: median,
                upper: median,
            },
        });
    }

    let dist =
        LogNormal::new(s0.ln() + m, s).map_err(|e| Error::InvalidParameter(e.to_string()))?;
    Ok(LogNormalForecast {
        mean,
        median,
        prob_loss: dist.cdf(s0),
        interval: ConfidenceInterval {
            level: confidence_level,
            lower: dist.inverse_cdf(0.5 * (1.0 - confidence_level)),
            upper: dist.inverse_cdf(0.5 * (1.0 + confidence_level)),
        },
    })
}
