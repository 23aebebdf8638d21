//! Bar types on either side of the normalizer.
//!
//! [`RawBar`] is what a [`DataProvider`](crate::providers::DataProvider)
//! hands back: every field optional, dates as free-form strings. [`PriceBar`]
//! is the validated, canonical observation the rest of the pipeline works
//! with.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical rendering of a bar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A loosely-typed OHLCV record as delivered by a market data source.
///
/// Field names accept the spellings used by common vendors, so
/// `{"Date": ..., "Close": ...}` and `{"t": ..., "c": ...}` both deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    #[serde(default, alias = "Date", alias = "t", alias = "timestamp")]
    pub date: Option<String>,
    #[serde(default, alias = "Open", alias = "o")]
    pub open: Option<f64>,
    #[serde(default, alias = "High", alias = "h")]
    pub high: Option<f64>,
    #[serde(default, alias = "Low", alias = "l")]
    pub low: Option<f64>,
    #[serde(default, alias = "Close", alias = "c")]
    pub close: Option<f64>,
    #[serde(default, alias = "Volume", alias = "v")]
    pub volume: Option<f64>,
}

impl RawBar {
    /// A fully populated record, mostly useful for fixtures.
    pub fn new(date: &str, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date: Some(date.to_string()),
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            volume: Some(volume),
        }
    }
}

/// A single trading-period observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBar {
    /// Trading date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,

    /// Opening price.
    pub open: f64,

    /// Highest price during the period.
    pub high: f64,

    /// Lowest price during the period.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Shares traded during the period.
    pub volume: u64,
}

impl PriceBar {
    /// The bar date in canonical `YYYY-MM-DD` form.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}
