//! Historical risk metrics of a price series.

use ag_core::{ensure, Price, PriceSeries, Rate, Real, Result, Size};
use serde::Serialize;

use crate::returns::{estimate_from_prices, ReturnStatistics};

/// Descriptive metrics of the history a forecast starts from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoricalMetrics {
    /// Number of prices.
    pub observations: Size,
    /// Most recent price; the forecast's start price.
    pub latest_price: Price,
    /// Per-day drift and volatility of the log returns.
    pub daily: ReturnStatistics,
    /// `daily.drift · P`.
    pub annualized_return: Real,
    /// `daily.volatility · √P`.
    pub annualized_volatility: Real,
    /// Largest peak-to-trough decline, as a non-positive fraction.
    pub max_drawdown: Real,
    /// `(annualized_return − rf) / annualized_volatility`; `None` when the
    /// series has no volatility.
    pub sharpe_ratio: Option<Real>,
}

/// Largest relative decline from a running peak: `min_t p_t / max_{s≤t} p_s − 1`.
///
/// Zero for an empty or never-declining series.
pub fn max_drawdown(prices: &[Price]) -> Real {
    let mut peak = Real::NEG_INFINITY;
    let mut worst: Real = 0.0;
    for &p in prices {
        peak = peak.max(p);
        worst = worst.min(p / peak - 1.0);
    }
    worst
}

/// Compute [`HistoricalMetrics`] with `trading_days_per_year` periods per
/// year and an annual `risk_free_rate`.
///
/// # Errors
/// As [`estimate_from_prices`](crate::returns::estimate_from_prices), and
/// [`InvalidParameter`](ag_core::Error::InvalidParameter) if
/// `trading_days_per_year == 0`.
pub fn historical_metrics(
    series: &PriceSeries,
    trading_days_per_year: Size,
    risk_free_rate: Rate,
) -> Result<HistoricalMetrics> {
    ensure!(
        trading_days_per_year > 0,
        InvalidParameter,
        "trading_days_per_year must be positive"
    );
    let prices = series.prices();
    let stats = estimate_from_prices(&prices)?;
    let annual = stats.annualized(trading_days_per_year);
    let latest_price = prices[prices.len() - 1];

    let sharpe_ratio = (annual.volatility > 0.0)
        .then(|| (annual.drift - risk_free_rate) / annual.volatility);

    Ok(HistoricalMetrics {
        observations: prices.len(),
        latest_price,
        daily: stats,
        annualized_return: annual.drift,
        annualized_volatility: annual.volatility,
        max_drawdown: max_drawdown(&prices),
        sharpe_ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    fn series(prices: &[Price]) -> PriceSeries {
        PriceSeries::from_daily(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), prices)
    }

    #[test]
    fn drawdown_from_running_peak() {
        // peak 120, trough 90 → -25 %
        assert_abs_diff_eq!(
            max_drawdown(&[100.0, 120.0, 110.0, 90.0, 130.0, 125.0]),
            -0.25,
            epsilon = 1e-12
        );
        assert_eq!(max_drawdown(&[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(max_drawdown(&[]), 0.0);
    }

    #[test]
    fn metrics_of_reference_series() {
        let s = series(&[100.0, 102.0, 101.0, 105.0]);
        let m = historical_metrics(&s, 252, 0.0).unwrap();
        assert_eq!(m.observations, 4);
        assert_eq!(m.daily, estimate_from_prices(&[100.0, 102.0, 101.0, 105.0]).unwrap());
        assert_eq!(m.latest_price, 105.0);
        assert_abs_diff_eq!(m.annualized_return, m.daily.drift * 252.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            m.annualized_volatility,
            m.daily.volatility * 252_f64.sqrt(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(m.max_drawdown, 101.0 / 102.0 - 1.0, epsilon = 1e-12);
        let sharpe = m.sharpe_ratio.unwrap();
        assert_abs_diff_eq!(
            sharpe,
            m.annualized_return / m.annualized_volatility,
            epsilon = 1e-12
        );
    }

    #[test]
    fn risk_free_rate_lowers_sharpe() {
        let s = series(&[100.0, 102.0, 101.0, 105.0, 104.0]);
        let a = historical_metrics(&s, 252, 0.0).unwrap().sharpe_ratio.unwrap();
        let b = historical_metrics(&s, 252, 0.05).unwrap().sharpe_ratio.unwrap();
        assert!(b < a);
    }

    #[test]
    fn flat_series_has_no_sharpe() {
        let m = historical_metrics(&series(&[10.0; 5]), 252, 0.0).unwrap();
        assert!(m.sharpe_ratio.is_none());
        assert_eq!(m.max_drawdown, 0.0);
    }

    #[test]
    fn zero_periods_rejected() {
        assert!(historical_metrics(&series(&[1.0, 2.0, 3.0]), 0, 0.0).is_err());
    }
}
