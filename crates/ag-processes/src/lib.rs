//! # ag-processes
//!
//! Stochastic process definitions.
//!
//! The one-dimensional process trait used by the Monte Carlo path
//! generator, and geometric Brownian motion stepped with its exact
//! log-normal transition.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod geometric_brownian_motion;
pub mod stochastic_process;

pub use geometric_brownian_motion::GeometricBrownianMotionProcess;
pub use stochastic_process::StochasticProcess1D;
