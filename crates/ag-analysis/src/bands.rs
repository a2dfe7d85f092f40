//! Per-day percentile bands ("fan chart") of a simulated ensemble.

use ag_core::{ensure, Real, Result, Size};
use ag_math::{quantile_sorted, sorted, Statistics};
use ag_methods::PathEnsemble;
use serde::Serialize;

/// Cross-sectional summary of one simulated day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBand {
    /// Day index, `0..=num_days`.
    pub day: Size,
    /// Mean price across paths.
    pub mean: Real,
    /// One quantile per requested level, in level order.
    pub quantiles: Vec<Real>,
}

/// Percentile bands over the whole horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileBands {
    /// Requested levels in `[0, 1]`.
    pub levels: Vec<Real>,
    /// One entry per day, day 0 first.
    pub days: Vec<DayBand>,
}

impl PercentileBands {
    /// The series of one level across days, if the level was requested.
    pub fn series(&self, level: Real) -> Option<Vec<Real>> {
        let k = self
            .levels
            .iter()
            .position(|l| (l - level).abs() < 1e-12)?;
        Some(self.days.iter().map(|d| d.quantiles[k]).collect())
    }
}

/// Quantiles of every day's cross-section at `levels`.
///
/// # Errors
/// [`InvalidParameter`](ag_core::Error::InvalidParameter) if `levels` is
/// empty or holds a value outside `[0, 1]`.
pub fn percentile_bands(ensemble: &PathEnsemble, levels: &[Real]) -> Result<PercentileBands> {
    ensure!(!levels.is_empty(), InvalidParameter, "no band levels given");
    for &p in levels {
        ensure!(
            (0.0..=1.0).contains(&p),
            InvalidParameter,
            "band level must be in [0, 1], got {p}"
        );
    }

    let days = (0..=ensemble.num_days())
        .map(|t| {
            let column = sorted(&ensemble.day(t));
            let stats: Statistics = column.iter().copied().collect();
            let quantiles = levels
                .iter()
                .map(|&p| quantile_sorted(&column, p))
                .collect::<Result<Vec<_>>>()?;
            Ok(DayBand {
                day: t,
                mean: stats.mean().unwrap_or(Real::NAN),
                quantiles,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PercentileBands {
        levels: levels.to_vec(),
        days,
    })
}
