//! Closing-price threshold filter.

use tracing::debug;

use crate::models::series::PriceSeries;

/// Bars whose close is strictly above `threshold`, in their original order.
///
/// Any threshold is accepted; keeping it inside a sensible range is the
/// caller's business.
pub fn filter_above(series: &PriceSeries, threshold: f64) -> PriceSeries {
    let bars = series
        .iter()
        .filter(|bar| bar.close > threshold)
        .copied()
        .collect::<Vec<_>>();
    debug!(
        symbol = series.symbol(),
        threshold,
        kept = bars.len(),
        of = series.len(),
        "filtered bars above threshold"
    );
    PriceSeries::from_ordered_bars(series.symbol().to_string(), series.period(), bars)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{bar::PriceBar, period::Period};

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .zip(start.iter_days())
            .map(|(&close, date)| PriceBar {
                date,
                open: close,
                high: close,
                low: close,
                close,
                volume: 0,
            })
            .collect();
        PriceSeries::try_from_bars("AAPL", Period::OneMonth, bars).unwrap()
    }

    #[test]
    fn keeps_closes_above_threshold() {
        let filtered = filter_above(&series(&[5.0, 15.0, 25.0]), 10.0);
        assert_eq!(filtered.closes(), vec![15.0, 25.0]);
        assert_eq!(filtered.dates(), vec!["2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn threshold_is_exclusive() {
        let filtered = filter_above(&series(&[10.0, 10.5]), 10.0);
        assert_eq!(filtered.closes(), vec![10.5]);
    }

    #[test]
    fn out_of_range_thresholds_are_accepted() {
        let input = series(&[5.0, 15.0]);
        assert_eq!(filter_above(&input, -1e9).len(), 2);
        assert!(filter_above(&input, 1e9).is_empty());
    }

    #[test]
    fn empty_in_empty_out() {
        let empty = PriceSeries::empty("AAPL", Period::OneMonth);
        assert!(filter_above(&empty, 500.0).is_empty());
    }
}
