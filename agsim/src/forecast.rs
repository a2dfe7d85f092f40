//! The end-to-end forecasting pipeline.
//!
//! ```text
//! PriceSeries ──historical_metrics──► ReturnStatistics ──► SimulationParameters
//!                                                                    │
//!                                                                simulate
//!                                                                    ▼
//! ForecastReport ◄──────────analyze / bands / analytic────────── PathEnsemble
//! ```
//!
//! Every stage hands an immutable value to the next.

use std::time::Instant;

use ag_analysis::{
    analyze_with, historical_metrics, lognormal_forecast, percentile_bands, AnalysisOptions,
    HistoricalMetrics, LogNormalForecast, OutcomeSummary, PercentileBands,
};
use ag_core::{ForecastConfig, PriceSeries, Result};
use ag_math::StdNormalRng;
use ag_methods::{simulate_parallel, simulate_substreams, PathEnsemble, SimulationParameters};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

/// Everything a forecasting run reports, apart from the raw paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    /// Date of the last historical price, the forecast origin.
    pub as_of: NaiveDate,
    /// Master seed of the simulation; rerunning with it reproduces the paths.
    pub seed: u64,
    /// Descriptive metrics of the history, including the per-day drift and
    /// volatility the parameters are built from.
    pub historical: HistoricalMetrics,
    /// Parameters handed to the simulator.
    pub parameters: SimulationParameters,
    /// Terminal-distribution summary.
    pub outcome: OutcomeSummary,
    /// Per-day percentile bands; `None` when no levels are configured.
    pub bands: Option<PercentileBands>,
    /// Closed-form log-normal counterpart of the outcome.
    pub analytic: LogNormalForecast,
}

/// A completed forecasting run: the report and the simulated ensemble.
#[derive(Debug, Clone)]
pub struct Forecast {
    report: ForecastReport,
    ensemble: PathEnsemble,
}

impl Forecast {
    /// Run the pipeline on `history` with `config`.
    ///
    /// The seed is `config.seed` when set, otherwise drawn from the OS and
    /// recorded in the report.  `config.parallel` selects the rayon pool but
    /// never changes the result.
    ///
    /// # Errors
    /// The first error of any stage: invalid configuration, or too little or
    /// malformed history.
    pub fn run(history: &PriceSeries, config: &ForecastConfig) -> Result<Self> {
        let started = Instant::now();
        config.validate()?;
        history.validate()?;

        let historical =
            historical_metrics(history, config.trading_days_per_year, config.risk_free_rate)?;
        let Some((as_of, start_price)) = history.latest() else {
            ag_core::fail!(InsufficientData, "empty price history");
        };
        let parameters = historical.daily.to_parameters(
            start_price,
            config.horizon_days,
            config.num_paths,
            config.drift_convention,
        )?;

        let seed = config.seed.unwrap_or_else(rand::random);
        info!(
            %as_of,
            start_price,
            drift = parameters.drift(),
            volatility = parameters.volatility(),
            paths = config.num_paths,
            days = config.horizon_days,
            seed,
            "starting forecast"
        );
        let ensemble = if config.parallel {
            simulate_parallel::<StdNormalRng>(&parameters, seed)?
        } else {
            simulate_substreams::<StdNormalRng>(&parameters, seed)?
        };

        let outcome = analyze_with(&ensemble, &AnalysisOptions::from(config))?;
        let bands = if config.band_levels.is_empty() {
            None
        } else {
            Some(percentile_bands(&ensemble, &config.band_levels)?)
        };
        let analytic = lognormal_forecast(&parameters, config.interval_confidence)?;

        info!(
            median = outcome.median,
            lower = outcome.interval.lower,
            upper = outcome.interval.upper,
            prob_loss = outcome.prob_loss,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "forecast complete"
        );
        Ok(Self {
            report: ForecastReport {
                as_of,
                seed,
                historical,
                parameters,
                outcome,
                bands,
                analytic,
            },
            ensemble,
        })
    }

    /// The run's report.
    pub fn report(&self) -> &ForecastReport {
        &self.report
    }

    /// The simulated paths.
    pub fn ensemble(&self) -> &PathEnsemble {
        &self.ensemble
    }

    /// Split into report and ensemble.
    pub fn into_parts(self) -> (ForecastReport, PathEnsemble) {
        (self.report, self.ensemble)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ag_core::{DriftConvention, Error};

    fn history() -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let prices: Vec<f64> = (0..120)
            .map(|i| 85.0 * (1.0 + 0.001 * i as f64) * if i % 3 == 0 { 1.02 } else { 0.99 })
            .collect();
        PriceSeries::from_daily(start, &prices)
    }

    fn config() -> ForecastConfig {
        ForecastConfig {
            num_paths: 400,
            horizon_days: 30,
            seed: Some(12),
            ..ForecastConfig::default()
        }
    }

    #[test]
    fn seeded_run_is_reproducible_and_parallel_agnostic() {
        let a = Forecast::run(&history(), &config()).unwrap();
        let b = Forecast::run(
            &history(),
            &ForecastConfig {
                parallel: false,
                ..config()
            },
        )
        .unwrap();
        assert_eq!(a.ensemble(), b.ensemble());
        assert_eq!(a.report(), b.report());
        assert_eq!(a.report().seed, 12);
    }

    #[test]
    fn report_is_consistent() {
        let f = Forecast::run(&history(), &config()).unwrap();
        let r = f.report();
        assert_eq!(r.as_of, NaiveDate::from_ymd_opt(2024, 4, 29).unwrap());
        assert_eq!(r.parameters.start_price(), r.historical.latest_price);
        assert_eq!(r.parameters.drift(), r.historical.daily.drift);
        assert_eq!(r.outcome.paths, 400);
        assert_eq!(r.outcome.tail_risk.len(), 2);
        assert_eq!(r.bands.as_ref().unwrap().days.len(), 31);
        assert_eq!(f.ensemble().num_days(), 30);
    }

    #[test]
    fn ito_compensated_shifts_drift() {
        let f = Forecast::run(
            &history(),
            &ForecastConfig {
                drift_convention: DriftConvention::ItoCompensated,
                band_levels: vec![],
                ..config()
            },
        )
        .unwrap();
        let r = f.report();
        let daily = r.historical.daily;
        let v = daily.volatility;
        assert!((r.parameters.drift() - (daily.drift + 0.5 * v * v)).abs() < 1e-15);
        assert!(r.bands.is_none());
    }

    #[test]
    fn errors_surface() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let short = PriceSeries::from_daily(start, &[1.0, 2.0]);
        assert!(matches!(
            Forecast::run(&short, &config()),
            Err(Error::InsufficientData(_))
        ));
        let bad = ForecastConfig {
            interval_confidence: 1.0,
            ..config()
        };
        assert!(matches!(
            Forecast::run(&history(), &bad),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn few_paths_still_report_tail_risk() {
        let few = ForecastConfig {
            num_paths: 10,
            ..config()
        };
        let f = Forecast::run(&history(), &few).unwrap();
        let o = &f.report().outcome;
        assert_eq!(o.paths, 10);
        let worst = f
            .ensemble()
            .terminal_prices()
            .into_iter()
            .fold(f64::INFINITY, f64::min);
        let t = o.tail_at(0.99).unwrap();
        assert_eq!(t.tail_size, 1);
        assert_eq!(t.cvar, worst / o.start_price - 1.0);
    }
}
