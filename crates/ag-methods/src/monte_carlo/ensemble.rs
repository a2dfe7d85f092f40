//! Fixed-shape storage for simulated paths.

use ag_core::{ensure, Price, Real, Result, Size};

/// An ensemble of simulated price paths.
///
/// Stored row-major in one contiguous buffer: `num_paths` rows of
/// `num_days + 1` prices each, column 0 being the common start price.  The
/// buffer is allocated once at its final size.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEnsemble {
    values: Vec<Real>,
    num_paths: Size,
    num_days: Size,
}

impl PathEnsemble {
    /// Allocate an ensemble with every entry set to `start_price`.
    pub(crate) fn filled(start_price: Price, num_paths: Size, num_days: Size) -> Result<Self> {
        let len = num_days
            .checked_add(1)
            .and_then(|cols| cols.checked_mul(num_paths))
            .filter(|&len| len <= isize::MAX as usize / std::mem::size_of::<Real>());
        let Some(len) = len else {
            ag_core::fail!(
                InvalidParameter,
                "ensemble of {num_paths} paths x {num_days} days does not fit in memory"
            );
        };
        Ok(Self {
            values: vec![start_price; len],
            num_paths,
            num_days,
        })
    }

    /// Build from explicit rows, e.g. paths produced elsewhere.
    ///
    /// # Errors
    /// [`InvalidData`](ag_core::Error::InvalidData) if there are no rows,
    /// rows differ in length or are empty, or rows do not share a positive
    /// day-0 price.
    pub fn from_rows(rows: Vec<Vec<Real>>) -> Result<Self> {
        ensure!(!rows.is_empty(), InvalidData, "ensemble needs at least one path");
        let width = rows[0].len();
        ensure!(width > 0, InvalidData, "paths must contain the day-0 price");
        let start = rows[0][0];
        ensure!(
            start.is_finite() && start > 0.0,
            InvalidData,
            "start price must be positive and finite, got {start}"
        );

        let num_paths = rows.len();
        let mut values = Vec::with_capacity(num_paths * width);
        for (i, row) in rows.into_iter().enumerate() {
            ensure!(
                row.len() == width,
                InvalidData,
                "path {i} has {} points, expected {width}",
                row.len()
            );
            ensure!(
                row[0] == start,
                InvalidData,
                "path {i} starts at {}, expected {start}",
                row[0]
            );
            values.extend(row);
        }
        Ok(Self {
            values,
            num_paths,
            num_days: width - 1,
        })
    }

    /// Number of paths (rows).
    pub fn num_paths(&self) -> Size {
        self.num_paths
    }

    /// Number of simulated days; each row holds `num_days + 1` prices.
    pub fn num_days(&self) -> Size {
        self.num_days
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (Size, Size) {
        (self.num_paths, self.num_days + 1)
    }

    /// The common day-0 price.
    pub fn start_price(&self) -> Price {
        self.values[0]
    }

    /// Path `i` as a slice of `num_days + 1` prices.
    ///
    /// # Panics
    /// Panics if `i >= num_paths()`.
    pub fn path(&self, i: Size) -> &[Real] {
        let w = self.num_days + 1;
        &self.values[i * w..(i + 1) * w]
    }

    /// Iterate over the paths in order.
    pub fn paths(&self) -> std::slice::ChunksExact<'_, Real> {
        self.values.chunks_exact(self.num_days + 1)
    }

    /// Price of path `i` on day `t`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn value(&self, i: Size, t: Size) -> Real {
        assert!(t <= self.num_days, "day {t} out of range [0, {}]", self.num_days);
        self.path(i)[t]
    }

    /// Cross-section of all paths on day `t`.
    ///
    /// # Panics
    /// Panics if `t > num_days()`.
    pub fn day(&self, t: Size) -> Vec<Real> {
        assert!(t <= self.num_days, "day {t} out of range [0, {}]", self.num_days);
        self.paths().map(|p| p[t]).collect()
    }

    /// Final-day price of every path.
    pub fn terminal_prices(&self) -> Vec<Real> {
        self.day(self.num_days)
    }

    /// The raw row-major buffer.
    pub fn as_slice(&self) -> &[Real] {
        &self.values
    }

    pub(crate) fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, Real> {
        let w = self.num_days + 1;
        self.values.chunks_exact_mut(w)
    }

    pub(crate) fn values_mut(&mut self) -> &mut [Real] {
        &mut self.values
    }
}
