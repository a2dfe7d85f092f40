//! # ag-data
//!
//! File-level plumbing around the forecasting core: reading dated price
//! series from CSV, turning silver quotes in USD per troy ounce into INR per
//! gram, and exporting simulated ensembles.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Currency and unit conversion of price series.
pub mod conversion;

/// Ensemble export.
pub mod export;

/// CSV price-series loading.
pub mod loader;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use conversion::{to_inr_per_gram, usd_per_ounce_to_inr_per_gram, TROY_OUNCE_GRAMS};
pub use export::{save_ensemble, write_ensemble};
pub use loader::{load_price_series, read_price_series, ColumnNames};
