//! Ensemble simulation.
//!
//! Three entry points share one path kernel:
//!
//! * [`simulate`] draws every path, in order, from one injected source.
//! * [`simulate_substreams`] gives path `i` its own source seeded with
//!   `substream_seed(master_seed, i)` and runs on the calling thread.
//! * [`simulate_parallel`] does the same on the rayon pool.  Its output is
//!   bit-identical to [`simulate_substreams`] whatever the thread count.

use std::time::Instant;

use ag_core::Result;
use ag_math::{substream_seed, NormalSource, SeedableNormalSource};
use rayon::prelude::*;
use tracing::{debug, info};

use super::{PathEnsemble, PathGenerator, SimulationParameters};

/// Simulate `num_paths` GBM paths drawing all shocks from `rng`.
///
/// Day 0 of every path is `start_price`; each following day applies
/// `exp((μ − σ²/2)·dt + σ·√dt·z)`.
///
/// # Errors
/// [`InvalidParameter`](ag_core::Error::InvalidParameter) if the ensemble
/// shape cannot be allocated.
pub fn simulate<R: NormalSource + ?Sized>(
    params: &SimulationParameters,
    rng: &mut R,
) -> Result<PathEnsemble> {
    let started = Instant::now();
    let process = params.process()?;
    let gen = PathGenerator::new(&process, params.time_step(), params.num_days());
    let mut ensemble =
        PathEnsemble::filled(params.start_price(), params.num_paths(), params.num_days())?;

    debug!(
        paths = params.num_paths(),
        days = params.num_days(),
        drift = params.drift(),
        volatility = params.volatility(),
        "simulating from shared source"
    );
    for row in ensemble.rows_mut() {
        gen.fill(row, rng);
    }

    info!(
        paths = params.num_paths(),
        days = params.num_days(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "simulation complete"
    );
    Ok(ensemble)
}

/// Simulate with one deterministic sub-stream per path, sequentially.
///
/// # Errors
/// As [`simulate`].
pub fn simulate_substreams<R: SeedableNormalSource>(
    params: &SimulationParameters,
    master_seed: u64,
) -> Result<PathEnsemble> {
    let started = Instant::now();
    let process = params.process()?;
    let gen = PathGenerator::new(&process, params.time_step(), params.num_days());
    let mut ensemble =
        PathEnsemble::filled(params.start_price(), params.num_paths(), params.num_days())?;

    debug!(seed = master_seed, "simulating sub-streams sequentially");
    for (i, row) in ensemble.rows_mut().enumerate() {
        let mut rng = R::from_seed(substream_seed(master_seed, i as u64));
        gen.fill(row, &mut rng);
    }

    info!(
        paths = params.num_paths(),
        days = params.num_days(),
        seed = master_seed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "simulation complete"
    );
    Ok(ensemble)
}

/// Simulate with one deterministic sub-stream per path on the rayon pool.
///
/// Workers share only the read-only process; each owns its path's row and
/// its path's random source.
///
/// # Errors
/// As [`simulate`].
pub fn simulate_parallel<R: SeedableNormalSource>(
    params: &SimulationParameters,
    master_seed: u64,
) -> Result<PathEnsemble> {
    let started = Instant::now();
    let process = params.process()?;
    let gen = PathGenerator::new(&process, params.time_step(), params.num_days());
    let mut ensemble =
        PathEnsemble::filled(params.start_price(), params.num_paths(), params.num_days())?;
    let width = params.num_days() + 1;

    debug!(
        seed = master_seed,
        threads = rayon::current_num_threads(),
        "simulating sub-streams in parallel"
    );
    ensemble
        .values_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(i, row)| {
            let mut rng = R::from_seed(substream_seed(master_seed, i as u64));
            gen.fill(row, &mut rng);
        });

    info!(
        paths = params.num_paths(),
        days = params.num_days(),
        seed = master_seed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "simulation complete"
    );
    Ok(ensemble)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ag_math::{InverseCumulativeNormalRng, StdNormalRng};
    use approx::assert_relative_eq;

    #[test]
    fn zero_drift_zero_volatility_is_flat() {
        let params = SimulationParameters::new(0.0, 0.0, 100.0, 5, 10).unwrap();
        let e = simulate(&params, &mut StdNormalRng::new(1)).unwrap();
        assert_eq!(e.shape(), (10, 6));
        assert!(e.as_slice().iter().all(|&x| x == 100.0));
    }

    #[test]
    fn zero_volatility_grows_exponentially() {
        let drift = 0.002;
        let params = SimulationParameters::new(drift, 0.0, 100.0, 30, 4).unwrap();
        let e = simulate(&params, &mut InverseCumulativeNormalRng::new(5)).unwrap();
        for path in e.paths() {
            for (t, &x) in path.iter().enumerate() {
                assert_relative_eq!(x, 100.0 * (drift * t as f64).exp(), max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let params = SimulationParameters::new(0.0003, 0.02, 7000.0, 50, 200).unwrap();
        let a = simulate(&params, &mut StdNormalRng::new(42)).unwrap();
        let b = simulate(&params, &mut StdNormalRng::new(42)).unwrap();
        assert_eq!(a, b);
        let c = simulate(&params, &mut StdNormalRng::new(43)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn parallel_matches_sequential_substreams() {
        let params = SimulationParameters::new(0.0003, 0.02, 7000.0, 40, 333).unwrap();
        let seq = simulate_substreams::<StdNormalRng>(&params, 2024).unwrap();
        let par = simulate_parallel::<StdNormalRng>(&params, 2024).unwrap();
        assert_eq!(seq, par);
        let par_mt = simulate_parallel::<InverseCumulativeNormalRng>(&params, 2024).unwrap();
        let seq_mt = simulate_substreams::<InverseCumulativeNormalRng>(&params, 2024).unwrap();
        assert_eq!(seq_mt, par_mt);
    }

    #[test]
    fn substream_paths_are_independent_of_path_count() {
        let small = SimulationParameters::new(0.0, 0.02, 100.0, 10, 5).unwrap();
        let large = SimulationParameters::new(0.0, 0.02, 100.0, 10, 50).unwrap();
        let a = simulate_parallel::<StdNormalRng>(&small, 9).unwrap();
        let b = simulate_parallel::<StdNormalRng>(&large, 9).unwrap();
        for i in 0..5 {
            assert_eq!(a.path(i), b.path(i));
        }
    }

    #[test]
    fn terminal_mean_matches_lognormal_expectation() {
        let (mu, sigma, days) = (0.0005, 0.02, 100);
        let params = SimulationParameters::new(mu, sigma, 100.0, days, 20_000).unwrap();
        let e = simulate_parallel::<StdNormalRng>(&params, 11).unwrap();
        let terminal = e.terminal_prices();
        let mean = terminal.iter().sum::<f64>() / terminal.len() as f64;
        let expected = 100.0 * (mu * days as f64).exp();
        // σ√T = 0.2 → std error of the mean ≈ 100 · 0.2 / √20000 ≈ 0.14
        assert!((mean - expected).abs() < 0.6, "mean {mean}, expected {expected}");
    }

    #[test]
    fn extreme_volatility_is_not_an_error() {
        let params = SimulationParameters::new(0.0, 5.0, 1.0, 2_000, 2).unwrap();
        let e = simulate(&params, &mut StdNormalRng::new(3)).unwrap();
        assert!(e.terminal_prices().iter().all(|x| *x >= 0.0));
    }
}
