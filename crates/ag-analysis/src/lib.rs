//! # ag-analysis
//!
//! Everything that turns numbers into statistics: the return statistics
//! estimator that feeds the simulator, historical risk metrics, the outcome
//! analyzer that summarises a simulated ensemble, per-day percentile bands,
//! and the closed-form log-normal benchmark.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Closed-form log-normal forecast for sanity checks.
pub mod analytic;

/// Per-day percentile bands of an ensemble.
pub mod bands;

/// Historical risk metrics of a price series.
pub mod historical;

/// Terminal-distribution summary and tail risk.
pub mod outcome;

/// Log returns and drift / volatility estimation.
pub mod returns;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use analytic::{lognormal_forecast, LogNormalForecast};
pub use bands::{percentile_bands, DayBand, PercentileBands};
pub use historical::{historical_metrics, max_drawdown, HistoricalMetrics};
pub use outcome::{
    analyze, analyze_with, AnalysisOptions, ConfidenceInterval, GainProbability, OutcomeSummary,
    TailRisk,
};
pub use returns::{estimate, estimate_from_prices, log_returns, ReturnStatistics};
