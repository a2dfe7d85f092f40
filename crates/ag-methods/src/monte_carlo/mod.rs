//! Monte Carlo simulation framework.
//!
//! # Overview
//!
//! * [`SimulationParameters`]: validated drift, volatility, start price,
//!   horizon, and path count
//! * [`PathGenerator`]: steps a 1-D process along a uniform grid
//! * [`PathEnsemble`]: the pre-sized `paths × (days + 1)` result
//! * [`simulate`], [`simulate_substreams`], [`simulate_parallel`]: the
//!   ensemble simulators

mod ensemble;
mod parameters;
mod path_generator;
mod simulator;

pub use ensemble::PathEnsemble;
pub use parameters::SimulationParameters;
pub use path_generator::PathGenerator;
pub use simulator::{simulate, simulate_parallel, simulate_substreams};
