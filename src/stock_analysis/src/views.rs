//! Projections of a price series into the shapes a presentation layer draws:
//! the data table, the candlestick chart, the moving-average chart and the
//! filtered table.

use serde::Serialize;

use crate::models::series::{DerivedSeries, PriceSeries};

/// One row of the data table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Parallel arrays for a candlestick chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Candlestick {
    pub dates: Vec<String>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

/// A named line keyed by the chart's dates. `None` leaves a gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Closing prices plus one line per moving average.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MovingAverageChart {
    pub dates: Vec<String>,
    pub close: Vec<f64>,
    pub lines: Vec<LineSeries>,
}

/// One row of the filtered table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredRow {
    pub date: String,
    pub close: f64,
}

pub fn table_rows(series: &PriceSeries) -> Vec<TableRow> {
    series
        .iter()
        .map(|bar| TableRow {
            date: bar.date_string(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        })
        .collect()
}

pub fn candlestick(series: &PriceSeries) -> Candlestick {
    let mut chart = Candlestick::default();
    for bar in series {
        chart.dates.push(bar.date_string());
        chart.open.push(bar.open);
        chart.high.push(bar.high);
        chart.low.push(bar.low);
        chart.close.push(bar.close);
    }
    chart
}

/// Builds the moving-average chart.
///
/// Every derived series must have been computed from `series`.
pub fn moving_average_chart(series: &PriceSeries, averages: &[DerivedSeries]) -> MovingAverageChart {
    let lines = averages
        .iter()
        .map(|average| {
            debug_assert_eq!(average.len(), series.len());
            LineSeries {
                name: average.label(),
                values: average.values().to_vec(),
            }
        })
        .collect();

    MovingAverageChart {
        dates: series.dates(),
        close: series.closes(),
        lines,
    }
}

pub fn filtered_rows(filtered: &PriceSeries) -> Vec<FilteredRow> {
    filtered
        .iter()
        .map(|bar| FilteredRow {
            date: bar.date_string(),
            close: bar.close,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::{
        filter::filter_above,
        metrics::moving_average,
        models::{bar::RawBar, period::Period},
        normalize::normalize,
    };

    fn sample() -> PriceSeries {
        normalize(
            "AAPL",
            Period::OneMonth,
            Ok(vec![
                RawBar::new("2024-01-01", 9.0, 11.0, 8.0, 10.0, 100.0),
                RawBar::new("2024-01-02", 10.0, 21.0, 9.0, 20.0, 200.0),
                RawBar::new("2024-01-03", 20.0, 31.0, 19.0, 30.0, 300.0),
            ]),
        )
    }

    #[test]
    fn table_has_all_columns() {
        let rows = table_rows(&sample());
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[1],
            TableRow {
                date: "2024-01-02".into(),
                open: 10.0,
                high: 21.0,
                low: 9.0,
                close: 20.0,
                volume: 200,
            }
        );
    }

    #[test]
    fn candlestick_arrays_are_parallel() {
        let chart = candlestick(&sample());
        assert_eq!(chart.dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(chart.open, vec![9.0, 10.0, 20.0]);
        assert_eq!(chart.high, vec![11.0, 21.0, 31.0]);
        assert_eq!(chart.low, vec![8.0, 9.0, 19.0]);
        assert_eq!(chart.close, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn moving_average_chart_names_lines_by_window() {
        let series = sample();
        let ma2 = moving_average(&series, NonZeroUsize::new(2).unwrap());
        let chart = moving_average_chart(&series, &[ma2]);

        assert_eq!(chart.close, vec![10.0, 20.0, 30.0]);
        assert_eq!(chart.lines.len(), 1);
        assert_eq!(chart.lines[0].name, "MA2");
        assert_eq!(chart.lines[0].values, vec![None, Some(15.0), Some(25.0)]);

        let json = serde_json::to_value(&chart).unwrap();
        assert!(json["lines"][0]["values"][0].is_null());
    }

    #[test]
    fn filtered_rows_have_date_and_close() {
        let rows = filtered_rows(&filter_above(&sample(), 15.0));
        assert_eq!(
            rows,
            vec![
                FilteredRow {
                    date: "2024-01-02".into(),
                    close: 20.0
                },
                FilteredRow {
                    date: "2024-01-03".into(),
                    close: 30.0
                },
            ]
        );
    }
}
