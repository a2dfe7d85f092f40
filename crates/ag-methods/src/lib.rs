//! # ag-methods
//!
//! Numerical methods: the Monte Carlo path simulator.
//!
//! # Modules
//!
//! * [`monte_carlo`]: simulation parameters, the path ensemble, the path
//!   generator, and the sequential / parallel simulators

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Monte Carlo simulation: parameters, path generation, ensembles.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use monte_carlo::{
    simulate, simulate_parallel, simulate_substreams, PathEnsemble, PathGenerator,
    SimulationParameters,
};
