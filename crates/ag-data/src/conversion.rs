//! Currency and unit conversion of price series.

use ag_core::{ensure, Price, PriceSeries, Real, Result};
use tracing::debug;

/// Grams per troy ounce.
pub const TROY_OUNCE_GRAMS: Real = 31.1035;

/// Convert silver quoted in USD per troy ounce into INR per gram.
///
/// Each silver date is priced with the latest USD/INR rate on or before it,
/// so FX holidays carry the previous fixing forward.  Silver dates earlier
/// than the first FX fixing are dropped.
///
/// # Errors
/// [`InsufficientData`](ag_core::Error::InsufficientData) if no silver date
/// has an FX rate; [`InvalidData`](ag_core::Error::InvalidData) if a
/// converted price is not positive and finite.
pub fn to_inr_per_gram(
    silver_usd_per_ounce: &PriceSeries,
    usd_inr: &PriceSeries,
) -> Result<PriceSeries> {
    let converted: Vec<_> = silver_usd_per_ounce
        .iter()
        .filter_map(|(date, usd_oz)| {
            usd_inr
                .price_on_or_before(date)
                .map(|fx| (date, usd_per_ounce_to_inr_per_gram(usd_oz, fx)))
        })
        .collect();
    ensure!(
        !converted.is_empty(),
        InsufficientData,
        "no silver quote on or after the first USD/INR fixing"
    );
    let dropped = silver_usd_per_ounce.len() - converted.len();
    if dropped > 0 {
        debug!(dropped, "dropped silver quotes before the first FX fixing");
    }

    let series = PriceSeries::from_pairs(converted)?;
    series.validate()?;
    Ok(series)
}

/// Price in INR per gram of one USD-per-ounce quote.
pub fn usd_per_ounce_to_inr_per_gram(usd_per_ounce: Price, usd_inr: Real) -> Price {
    usd_per_ounce / TROY_OUNCE_GRAMS * usd_inr
}
