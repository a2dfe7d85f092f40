//! Outcome analyzer.
//!
//! Summarises the terminal-day cross-section of a [`PathEnsemble`]: location,
//! dispersion and shape of the price distribution, a two-sided confidence
//! interval, and tail risk of the return `R = S_T / S_0 − 1`.
//!
//! Tail conventions:
//!
//! * `VaR(c)` is the `(1 − c)` quantile of `R`.  It is a return, so a loss
//!   shows up as a negative number.
//! * `CVaR(c)` is the mean of the tail, every return at or below `VaR(c)`,
//!   hence `CVaR(c) ≤ VaR(c)`.  The interpolated quantile never falls below
//!   the smallest return, so the tail holds at least the worst path even for
//!   a handful of paths at a high `c`.

use ag_core::{ensure, fail, ForecastConfig, Price, Real, Result, Size};
use ag_math::{quantile_sorted, sorted, Moments, Statistics};
use ag_methods::PathEnsemble;
use serde::Serialize;
use tracing::debug;

/// A two-sided interval holding `level` of the probability mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    /// Mass inside the interval, e.g. 0.90.
    pub level: Real,
    /// `(1 − level) / 2` quantile.
    pub lower: Real,
    /// `(1 + level) / 2` quantile.
    pub upper: Real,
}

impl ConfidenceInterval {
    /// Whether `x` lies inside the closed interval.
    pub fn contains(&self, x: Real) -> bool {
        self.lower <= x && x <= self.upper
    }
}

/// Value-at-Risk and Conditional VaR at one confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TailRisk {
    /// Confidence level `c`.
    pub confidence_level: Real,
    /// `(1 − c)` quantile of returns.
    pub var: Real,
    /// Mean return of the paths at or below `var`.
    pub cvar: Real,
    /// Number of paths at or below `var`.
    pub tail_size: Size,
}

/// Probability that the terminal price beats `S_0·(1 + threshold)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GainProbability {
    /// Return threshold, e.g. 0.10 for +10 %.
    pub threshold: Real,
    /// Fraction of paths strictly above the threshold.
    pub probability: Real,
}

/// What [`analyze_with`] reports beyond the basics.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    /// Level of the reported price interval.
    pub interval_confidence: Real,
    /// Levels at which VaR / CVaR are computed.
    pub var_levels: Vec<Real>,
    /// Return thresholds for gain probabilities.
    pub gain_thresholds: Vec<Real>,
}

impl AnalysisOptions {
    /// Interval and tail risk at the same `confidence_level`, no gain
    /// thresholds.
    pub fn new(confidence_level: Real) -> Self {
        Self {
            interval_confidence: confidence_level,
            var_levels: vec![confidence_level],
            gain_thresholds: Vec::new(),
        }
    }
}

impl From<&ForecastConfig> for AnalysisOptions {
    fn from(cfg: &ForecastConfig) -> Self {
        Self {
            interval_confidence: cfg.interval_confidence,
            var_levels: cfg.var_levels.clone(),
            gain_thresholds: cfg.gain_thresholds.clone(),
        }
    }
}

/// Summary of the simulated terminal-price distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeSummary {
    /// Number of paths analysed.
    pub paths: Size,
    /// Common day-0 price.
    pub start_price: Price,
    /// Mean terminal price.
    pub mean: Price,
    /// Median terminal price.
    pub median: Price,
    /// Sample standard deviation of terminal prices; `None` for one path.
    pub std_dev: Option<Real>,
    /// Smallest terminal price.
    pub min: Price,
    /// Largest terminal price.
    pub max: Price,
    /// 25th percentile of terminal prices.
    pub lower_quartile: Price,
    /// 75th percentile of terminal prices.
    pub upper_quartile: Price,
    /// Two-sided interval of terminal prices.
    pub interval: ConfidenceInterval,
    /// Mean return `E[S_T / S_0 − 1]`.
    pub expected_return: Real,
    /// Fraction of paths ending below the start price.
    pub prob_loss: Real,
    /// Fraction of paths ending above the start price.
    pub prob_gain: Real,
    /// Tail risk, one entry per requested level, in request order.
    pub tail_risk: Vec<TailRisk>,
    /// Gain probabilities, one per requested threshold.
    pub gain_probabilities: Vec<GainProbability>,
    /// Skewness of terminal prices (biased).
    pub skewness: Real,
    /// Excess kurtosis of terminal prices (biased).
    pub excess_kurtosis: Real,
}

impl OutcomeSummary {
    /// Tail risk at `confidence_level`, if it was requested.
    pub fn tail_at(&self, confidence_level: Real) -> Option<&TailRisk> {
        self.tail_risk
            .iter()
            .find(|t| (t.confidence_level - confidence_level).abs() < 1e-12)
    }
}

/// Analyse `ensemble` with interval and tail risk at `confidence_level`.
///
/// # Errors
/// [`InvalidParameter`](ag_core::Error::InvalidParameter) unless
/// `0 < confidence_level < 1`; [`EmptyTail`](ag_core::Error::EmptyTail)
/// if no return lies at or below the VaR, which only a NaN terminal price
/// can cause.
pub fn analyze(ensemble: &PathEnsemble, confidence_level: Real) -> Result<OutcomeSummary> {
    analyze_with(ensemble, &AnalysisOptions::new(confidence_level))
}

/// Analyse `ensemble` as configured by `options`.
///
/// # Errors
/// As [`analyze`], for every level in `options`.
pub fn analyze_with(ensemble: &PathEnsemble, options: &AnalysisOptions) -> Result<OutcomeSummary> {
    check_level(options.interval_confidence)?;
    for &c in &options.var_levels {
        check_level(c)?;
    }

    let start = ensemble.start_price();
    let terminal = sorted(&ensemble.terminal_prices());
    let n = terminal.len();
    let returns: Vec<Real> = terminal.iter().map(|&s| s / start - 1.0).collect();

    let stats: Statistics = terminal.iter().copied().collect();
    let moments = Moments::of(&terminal);
    let c = options.interval_confidence;
    let interval = ConfidenceInterval {
        level: c,
        lower: quantile_sorted(&terminal, (1.0 - c) / 2.0)?,
        upper: quantile_sorted(&terminal, (1.0 + c) / 2.0)?,
    };

    let tail_risk = options
        .var_levels
        .iter()
        .map(|&level| tail_risk(&returns, level))
        .collect::<Result<Vec<_>>>()?;

    let fraction = |count: usize| count as Real / n as Real;
    let gain_probabilities = options
        .gain_thresholds
        .iter()
        .map(|&k| GainProbability {
            threshold: k,
            probability: fraction(terminal.iter().filter(|&&s| s > start * (1.0 + k)).count()),
        })
        .collect();

    let summary = OutcomeSummary {
        paths: n,
        start_price: start,
        mean: stats.mean().unwrap_or(start),
        median: quantile_sorted(&terminal, 0.5)?,
        std_dev: stats.std_dev(),
        min: terminal[0],
        max: terminal[n - 1],
        lower_quartile: quantile_sorted(&terminal, 0.25)?,
        upper_quartile: quantile_sorted(&terminal, 0.75)?,
        interval,
        expected_return: returns.iter().sum::<Real>() / n as Real,
        prob_loss: fraction(terminal.iter().filter(|&&s| s < start).count()),
        prob_gain: fraction(terminal.iter().filter(|&&s| s > start).count()),
        tail_risk,
        gain_probabilities,
        skewness: moments.map_or(0.0, |m| m.skewness()),
        excess_kurtosis: moments.map_or(0.0, |m| m.excess_kurtosis()),
    };
    debug!(
        paths = n,
        mean = summary.mean,
        median = summary.median,
        prob_loss = summary.prob_loss,
        "analysed terminal distribution"
    );
    Ok(summary)
}

fn check_level(c: Real) -> Result<()> {
    ensure!(
        c > 0.0 && c < 1.0,
        InvalidParameter,
        "confidence level must be in (0, 1), got {c}"
    );
    Ok(())
}

/// VaR and CVaR of an ascending return sample at level `c`.
fn tail_risk(sorted_returns: &[Real], c: Real) -> Result<TailRisk> {
    let var = quantile_sorted(sorted_returns, 1.0 - c)?;
    let tail_size = sorted_returns.partition_point(|&r| r <= var);
    if tail_size == 0 {
        fail!(
            EmptyTail,
            "no return of {} outcomes at or below VaR {var} at level {c}",
            sorted_returns.len()
        );
    }
    let tail: Statistics = sorted_returns[..tail_size].iter().copied().collect();
    Ok(TailRisk {
        confidence_level: c,
        var,
        cvar: tail.mean().unwrap_or(var),
        tail_size,
    })
}
