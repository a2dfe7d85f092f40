//! Time-indexed containers.
//!
//! [`TimeSeries<K, V>`] is an ordered map from an index (usually a date) to a
//! value.  [`PriceSeries`] specialises it to daily closing prices and enforces
//! the "no duplicate dates" invariant at construction.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::errors::{Error, Result};
use crate::Price;

/// A generic time-indexed container backed by a `BTreeMap`.
///
/// Keys are always iterated in ascending order; missing keys return `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<K: Ord + Clone, V: Clone> {
    data: BTreeMap<K, V>,
}

impl<K: Ord + Clone, V: Clone> Default for TimeSeries<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V: Clone> FromIterator<(K, V)> for TimeSeries<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<K: Ord + Clone, V: Clone> TimeSeries<K, V> {
    /// Create an empty time series.
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The latest `(key, value)` entry, or `None` if empty.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.data.iter().next_back()
    }

    /// The value at `key`, or the value at the latest key before it.
    pub fn get_or_previous(&self, key: &K) -> Option<&V> {
        self.data.range(..=key.clone()).next_back().map(|(_, v)| v)
    }

    /// Insert or overwrite a value, returning the previous one.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.data.insert(key, value)
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<K> {
        self.data.keys().cloned().collect()
    }

    /// All values in key-ascending order.
    pub fn values(&self) -> Vec<V> {
        self.data.values().cloned().collect()
    }

    /// Iterate over `(&K, &V)` in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.data.iter()
    }
}

/// A chronologically ordered series of daily prices.
///
/// Built once and then only read.  Construction rejects duplicate dates;
/// value checks (positivity, finiteness) are left to [`PriceSeries::validate`]
/// and to the estimators that consume the series, so that malformed data is
/// reported where it is used.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceSeries {
    inner: TimeSeries<NaiveDate, Price>,
}

impl PriceSeries {
    /// Build from `(date, price)` pairs in any order.
    ///
    /// # Errors
    /// [`Error::InvalidData`] if the same date appears twice.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (NaiveDate, Price)>) -> Result<Self> {
        let mut inner = TimeSeries::new();
        for (date, price) in pairs {
            if inner.insert(date, price).is_some() {
                return Err(Error::InvalidData(format!("duplicate date {date}")));
            }
        }
        Ok(Self { inner })
    }

    /// Build a series of consecutive calendar days starting at `start`.
    ///
    /// Convenient when only the price sequence matters.
    pub fn from_daily(start: NaiveDate, prices: &[Price]) -> Self {
        let inner = start
            .iter_days()
            .zip(prices.iter().copied())
            .collect();
        Self { inner }
    }

    /// Check that every price is finite and strictly positive.
    ///
    /// # Errors
    /// [`Error::InvalidData`] naming the first offending date.
    pub fn validate(&self) -> Result<()> {
        for (date, &price) in self.inner.iter() {
            crate::ensure!(
                price.is_finite() && price > 0.0,
                InvalidData,
                "price on {date} must be positive and finite, got {price}"
            );
        }
        Ok(())
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Prices in chronological order.
    pub fn prices(&self) -> Vec<Price> {
        self.inner.values()
    }

    /// Dates in chronological order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.inner.keys()
    }

    /// The most recent `(date, price)` observation.
    pub fn latest(&self) -> Option<(NaiveDate, Price)> {
        self.inner.last().map(|(d, p)| (*d, *p))
    }

    /// Price on `date`, carrying the last known price forward over gaps.
    pub fn price_on_or_before(&self, date: NaiveDate) -> Option<Price> {
        self.inner.get_or_previous(&date).copied()
    }

    /// Iterate `(date, price)` in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Price)> + '_ {
        self.inner.iter().map(|(d, p)| (*d, *p))
    }
}
