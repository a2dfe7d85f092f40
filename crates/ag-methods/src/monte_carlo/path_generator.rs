//! Single-path generation.

use ag_core::{Real, Size, Time};
use ag_math::NormalSource;
use ag_processes::StochasticProcess1D;

/// Generates sample paths of a 1-D stochastic process on a uniform grid.
///
/// The generator holds no random state: every call is given the source it
/// draws from, so the same generator can be shared by parallel workers that
/// each own a sub-stream.
#[derive(Debug, Clone, Copy)]
pub struct PathGenerator<'a, P: StochasticProcess1D + ?Sized> {
    process: &'a P,
    dt: Time,
    steps: Size,
}

impl<'a, P: StochasticProcess1D + ?Sized> PathGenerator<'a, P> {
    /// Create a generator stepping `steps` times by `dt`.
    pub fn new(process: &'a P, dt: Time, steps: Size) -> Self {
        Self { process, dt, steps }
    }

    /// Number of steps per path.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Write one path into `row`: the initial value then `steps` evolved
    /// values, one normal draw per step.
    ///
    /// # Panics
    /// Panics if `row.len() != steps + 1`.
    pub fn fill<R: NormalSource + ?Sized>(&self, row: &mut [Real], rng: &mut R) {
        assert_eq!(row.len(), self.steps + 1, "row length must be steps + 1");
        let mut x = self.process.x0();
        row[0] = x;
        for (i, slot) in row[1..].iter_mut().enumerate() {
            let t = i as Real * self.dt;
            x = self.process.evolve_1d(t, x, self.dt, rng.next_normal());
            *slot = x;
        }
    }

    /// Generate one path into a fresh vector.
    pub fn next_path<R: NormalSource + ?Sized>(&self, rng: &mut R) -> Vec<Real> {
        let mut row = vec![0.0; self.steps + 1];
        self.fill(&mut row, rng);
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ag_processes::GeometricBrownianMotionProcess;
    use approx::assert_relative_eq;

    struct Constant(Real);

    impl NormalSource for Constant {
        fn next_normal(&mut self) -> Real {
            self.0
        }
    }

    #[test]
    fn path_follows_shocks() {
        let p = GeometricBrownianMotionProcess::new(100.0, 0.0, 0.1).unwrap();
        let gen = PathGenerator::new(&p, 1.0, 3);
        let path = gen.next_path(&mut Constant(1.0));
        assert_eq!(path.len(), 4);
        assert_eq!(path[0], 100.0);
        // each step multiplies by exp(-0.005 + 0.1)
        for t in 1..4 {
            assert_relative_eq!(path[t], 100.0 * (0.095 * t as Real).exp(), max_relative = 1e-12);
        }
    }

    #[test]
    fn works_through_trait_object() {
        let p = GeometricBrownianMotionProcess::new(10.0, 0.01, 0.0).unwrap();
        let process: &dyn StochasticProcess1D = &p;
        let gen = PathGenerator::new(process, 0.5, 2);
        let mut src: Box<dyn NormalSource> = Box::new(Constant(0.0));
        let path = gen.next_path(&mut src);
        assert_relative_eq!(path[2], 10.0 * (0.01_f64).exp(), max_relative = 1e-12);
    }
}
