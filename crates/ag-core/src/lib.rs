//! # ag-core
//!
//! Core types, configuration, and error definitions for agsim.
//!
//! This crate provides the building blocks shared across the workspace –
//! numeric type aliases, the error taxonomy with its `ensure!` / `fail!`
//! macros, the [`PriceSeries`] container, and [`ForecastConfig`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Run configuration and the drift convention.
pub mod settings;

/// Time-indexed containers and the price series.
pub mod time_series;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the workspace.
pub type Real = f64;

/// Alias used for counts, array sizes, and indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A price or value.
pub type Price = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement, in units of the simulation step.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use settings::{DriftConvention, ForecastConfig};
pub use time_series::{PriceSeries, TimeSeries};
