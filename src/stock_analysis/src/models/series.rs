//! Price series for one symbol and period, and the derived series computed
//! from them.

use std::num::NonZeroUsize;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::models::{bar::PriceBar, period::Period};

/// A bar was placed before a bar with a later date.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("bar dated {date} follows a bar dated {previous}")]
pub struct OutOfOrderError {
    pub date: NaiveDate,
    pub previous: NaiveDate,
}

/// Ordered bars for exactly one (symbol, period) pair.
///
/// Dates never decrease from one bar to the next. An empty series is a valid
/// value meaning "no data".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    period: Period,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// A series holding no bars.
    pub fn empty(symbol: impl Into<String>, period: Period) -> Self {
        Self {
            symbol: symbol.into(),
            period,
            bars: Vec::new(),
        }
    }

    /// Builds a series, rejecting bars whose dates go backwards.
    pub fn try_from_bars(
        symbol: impl Into<String>,
        period: Period,
        bars: Vec<PriceBar>,
    ) -> Result<Self, OutOfOrderError> {
        if let Some(pair) = bars.windows(2).find(|pair| pair[1].date < pair[0].date) {
            return Err(OutOfOrderError {
                date: pair[1].date,
                previous: pair[0].date,
            });
        }
        Ok(Self {
            symbol: symbol.into(),
            period,
            bars,
        })
    }

    /// Builds a series from bars the caller has already checked for order.
    pub(crate) fn from_ordered_bars(symbol: String, period: Period, bars: Vec<PriceBar>) -> Self {
        debug_assert!(bars.windows(2).all(|pair| pair[0].date <= pair[1].date));
        Self {
            symbol,
            period,
            bars,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceBar> {
        self.bars.iter()
    }

    /// Closing prices in series order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    /// Dates in canonical `YYYY-MM-DD` form, in series order.
    pub fn dates(&self) -> Vec<String> {
        self.bars.iter().map(PriceBar::date_string).collect()
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PriceBar;
    type IntoIter = std::slice::Iter<'a, PriceBar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

/// Values aligned index-for-index with a [`PriceSeries`].
///
/// `None` marks a position without enough trailing history for the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedSeries {
    window: NonZeroUsize,
    values: Vec<Option<f64>>,
}

impl DerivedSeries {
    pub(crate) fn new(window: NonZeroUsize, values: Vec<Option<f64>>) -> Self {
        Self { window, values }
    }

    pub fn window(&self) -> NonZeroUsize {
        self.window
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Chart label, e.g. `MA7`.
    pub fn label(&self) -> String {
        format!("MA{}", self.window)
    }
}
