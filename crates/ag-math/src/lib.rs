//! # ag-math
//!
//! Mathematical utilities: sample statistics and quantiles, the inverse
//! normal CDF, and seedable random number sources.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// Random number generators.
pub mod random_numbers;

/// Statistics accumulators, quantiles, and moments.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::normal_cdf_inverse;
pub use random_numbers::{
    substream_seed, InverseCumulativeNormalRng, NormalSource, SeedableNormalSource, StdNormalRng,
};
pub use statistics::{quantile, quantile_sorted, sorted, Moments, Statistics};
