//! Trailing moving averages over a [`PriceSeries`].

use std::num::NonZeroUsize;

use nonzero_ext::nonzero;
use tracing::debug;

use crate::models::series::{DerivedSeries, PriceSeries};

/// Short trend window, in bars.
pub const SHORT_WINDOW: NonZeroUsize = nonzero!(7usize);
/// Long trend window, in bars.
pub const LONG_WINDOW: NonZeroUsize = nonzero!(30usize);

/// Simple moving average of closing prices.
///
/// The result has one entry per bar. Entry `i` is `None` while fewer than
/// `window` bars end at `i`, otherwise the arithmetic mean of the closes at
/// `i + 1 - window ..= i`.
pub fn moving_average(series: &PriceSeries, window: NonZeroUsize) -> DerivedSeries {
    let closes = series.closes();
    let w = window.get();

    let mut values: Vec<Option<f64>> = Vec::with_capacity(closes.len());
    values.extend(std::iter::repeat_n(None, closes.len().min(w - 1)));
    values.extend(
        closes
            .windows(w)
            .map(|span| Some(span.iter().sum::<f64>() / w as f64)),
    );

    debug!(symbol = series.symbol(), window = w, len = values.len(), "moving average computed");
    DerivedSeries::new(window, values)
}

/// One moving average per window, in the order given.
pub fn moving_averages(series: &PriceSeries, windows: &[NonZeroUsize]) -> Vec<DerivedSeries> {
    windows
        .iter()
        .map(|&window| moving_average(series, window))
        .collect()
}
