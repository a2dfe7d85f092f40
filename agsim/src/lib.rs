//! # agsim
//!
//! Monte Carlo forecasting of silver prices in INR.
//!
//! This crate is a **façade** over the `ag-*` workspace crates plus the
//! [`Forecast`] pipeline that chains them: estimate drift and volatility
//! from history, simulate geometric Brownian motion paths, and summarise the
//! terminal distribution.
//!
//! ## Quick start
//!
//! ```rust
//! use agsim::core::{ForecastConfig, PriceSeries};
//! use agsim::Forecast;
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let prices: Vec<f64> = (0..60).map(|i| 90.0 + (i % 7) as f64).collect();
//! let history = PriceSeries::from_daily(start, &prices);
//!
//! let cfg = ForecastConfig {
//!     num_paths: 500,
//!     horizon_days: 20,
//!     seed: Some(7),
//!     ..ForecastConfig::default()
//! };
//! let forecast = Forecast::run(&history, &cfg).unwrap();
//! assert_eq!(forecast.ensemble().num_paths(), 500);
//! assert!(forecast.report().outcome.interval.contains(forecast.report().outcome.median));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, configuration, and error definitions.
pub use ag_core as core;

/// Random sources, statistics, and the normal distribution.
pub use ag_math as math;

/// Stochastic process definitions.
pub use ag_processes as processes;

/// Monte Carlo path simulation.
pub use ag_methods as methods;

/// Return estimation and outcome analysis.
pub use ag_analysis as analysis;

/// CSV loading, currency conversion, and export.
pub use ag_data as data;

/// The end-to-end forecasting pipeline.
pub mod forecast;

pub use forecast::{Forecast, ForecastReport};
