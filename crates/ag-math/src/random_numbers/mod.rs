//! Random number sources.
//!
//! Simulation code never reaches for process-wide random state.  It draws
//! from a [`NormalSource`] handed in by the caller, and parallel code builds
//! one [`SeedableNormalSource`] per path from [`substream_seed`].
//!
//! Two generators are provided:
//!
//! * [`InverseCumulativeNormalRng`]: Mersenne Twister MT19937-64 uniforms
//!   mapped through the inverse normal CDF.
//! * [`StdNormalRng`]: `rand`'s `StdRng` sampled with `rand_distr`'s
//!   Ziggurat `StandardNormal`.

use ag_core::Real;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_mt::Mt19937GenRand64;

/// A stream of independent standard-normal deviates.
pub trait NormalSource {
    /// Draw the next `N(0, 1)` deviate.
    fn next_normal(&mut self) -> Real;
}

impl<S: NormalSource + ?Sized> NormalSource for &mut S {
    fn next_normal(&mut self) -> Real {
        (**self).next_normal()
    }
}

impl<S: NormalSource + ?Sized> NormalSource for Box<S> {
    fn next_normal(&mut self) -> Real {
        (**self).next_normal()
    }
}

/// A normal source that can be rebuilt deterministically from a seed.
pub trait SeedableNormalSource: NormalSource + Sized {
    /// Create a source whose whole output is a function of `seed`.
    fn from_seed(seed: u64) -> Self;
}

/// Derive the seed of sub-stream `index` from a master seed.
///
/// Applies the SplitMix64 finaliser to the master seed and again to the
/// golden-ratio-spaced index, so neighbouring indices (and neighbouring
/// master seeds) give unrelated seeds.
pub fn substream_seed(master: u64, index: u64) -> u64 {
    splitmix64(splitmix64(master) ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// A uniform pseudo-random number generator based on the Mersenne Twister
/// MT19937-64 algorithm.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Generate the next uniform deviate in `[0, 1)`.
    pub fn next_real(&mut self) -> Real {
        // top 53 bits → exactly representable multiples of 2⁻⁵³
        (self.rng.next_u64() >> 11) as Real * (1.0 / (1u64 << 53) as Real)
    }
}

/// An inverse-cumulative normal random number generator.
///
/// Wraps a Mersenne Twister and transforms its output through the inverse
/// CDF of the standard normal distribution.
pub struct InverseCumulativeNormalRng {
    inner: MersenneTwisterUniformRng,
}

impl InverseCumulativeNormalRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: MersenneTwisterUniformRng::new(seed),
        }
    }
}

impl NormalSource for InverseCumulativeNormalRng {
    fn next_normal(&mut self) -> Real {
        // exact 0 would map to -∞
        let u = loop {
            let u = self.inner.next_real();
            if u > 0.0 {
                break u;
            }
        };
        crate::distributions::normal_cdf_inverse(u)
    }
}

impl SeedableNormalSource for InverseCumulativeNormalRng {
    fn from_seed(seed: u64) -> Self {
        Self::new(seed)
    }
}

/// Standard normals from `rand`'s `StdRng` via `rand_distr::StandardNormal`.
#[derive(Debug, Clone)]
pub struct StdNormalRng {
    rng: StdRng,
}

impl StdNormalRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl NormalSource for StdNormalRng {
    fn next_normal(&mut self) -> Real {
        self.rng.sample(StandardNormal)
    }
}

impl SeedableNormalSource for StdNormalRng {
    fn from_seed(seed: u64) -> Self {
        Self::new(seed)
    }
}
