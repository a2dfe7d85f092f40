//! CSV price-series loading.
//!
//! Expects a header row.  The date column holds ISO dates (`2024-03-28`);
//! anything after the first ten characters, such as a time of day or a UTC
//! offset, is ignored.  Rows with an empty price cell are skipped, which is
//! how market-data exports mark non-trading days.

use std::io::Read;
use std::path::Path;

use ag_core::{Error, Price, PriceSeries, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

/// Header names of the date and price columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    /// Column with the observation date.
    pub date: String,
    /// Column with the price.
    pub price: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            date: "date".to_string(),
            price: "price".to_string(),
        }
    }
}

impl ColumnNames {
    /// Columns with the given header names.
    pub fn new(date: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            price: price.into(),
        }
    }
}

/// Load a [`PriceSeries`] from the CSV file at `path`.
///
/// # Errors
/// [`Error::Io`] if the file cannot be opened, otherwise as
/// [`read_price_series`].
pub fn load_price_series<P: AsRef<Path>>(path: P, columns: &ColumnNames) -> Result<PriceSeries> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| Error::Io(format!("cannot open {}: {e}", path.display())))?;
    let series = read_price_series(file, columns)?;
    info!(path = %path.display(), observations = series.len(), "loaded price series");
    Ok(series)
}

/// Read a [`PriceSeries`] from CSV text.
///
/// # Errors
/// * [`Error::Parse`] for a missing column, a malformed row, an unparsable
///   date or price.
/// * [`Error::InvalidData`] for a duplicate date or a price that is not
///   positive and finite.
/// * [`Error::InsufficientData`] if no row carries a price.
pub fn read_price_series<R: Read>(reader: R, columns: &ColumnNames) -> Result<PriceSeries> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| Error::Parse(format!("cannot read header row: {e}")))?
        .clone();
    let position = |name: &str| {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            Error::Parse(format!(
                "missing column '{name}', available: {:?}",
                headers.iter().collect::<Vec<_>>()
            ))
        })
    };
    let date_idx = position(&columns.date)?;
    let price_idx = position(&columns.price)?;

    let mut pairs = Vec::new();
    let mut skipped = 0usize;
    for (row, record) in rdr.records().enumerate() {
        // header is line 1
        let line = row + 2;
        let record = record.map_err(|e| Error::Parse(format!("line {line}: {e}")))?;
        let raw_price = record.get(price_idx).unwrap_or("");
        if raw_price.is_empty() {
            skipped += 1;
            continue;
        }
        let raw_date = record.get(date_idx).unwrap_or("");
        let date = parse_date(raw_date)
            .ok_or_else(|| Error::Parse(format!("line {line}: bad date {raw_date:?}")))?;
        let price: Price = raw_price
            .parse()
            .map_err(|e| Error::Parse(format!("line {line}: bad price {raw_price:?}: {e}")))?;
        pairs.push((date, price));
    }
    if skipped > 0 {
        debug!(skipped, "skipped rows without a price");
    }
    ag_core::ensure!(!pairs.is_empty(), InsufficientData, "no priced rows in input");

    let series = PriceSeries::from_pairs(pairs)?;
    series.validate()?;
    Ok(series)
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let head = s.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
