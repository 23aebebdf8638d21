use std::num::NonZeroUsize;

use chrono::NaiveDate;
use proptest::prelude::*;
use stock_analysis::{
    filter::filter_above,
    metrics::moving_average,
    models::{bar::RawBar, period::Period, series::PriceSeries},
    normalize::normalize,
};

#[derive(Debug, Clone, Copy)]
enum RowKind {
    Good,
    MissingClose,
    BadDate,
    NegativeVolume,
}

fn row_kind() -> impl Strategy<Value = RowKind> {
    prop_oneof![
        6 => Just(RowKind::Good),
        1 => Just(RowKind::MissingClose),
        1 => Just(RowKind::BadDate),
        1 => Just(RowKind::NegativeVolume),
    ]
}

/// Rows on consecutive days, some deliberately broken.
fn raw_rows() -> impl Strategy<Value = Vec<(RowKind, RawBar)>> {
    proptest::collection::vec((row_kind(), 1.0f64..2_000.0, 0u32..1_000_000), 0..60).prop_map(
        |specs| {
            let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
            specs
                .into_iter()
                .zip(start.iter_days())
                .map(|((kind, close, volume), date)| {
                    let mut raw = RawBar::new(
                        &date.format("%Y-%m-%d").to_string(),
                        close,
                        close * 1.01,
                        close * 0.99,
                        close,
                        f64::from(volume),
                    );
                    match kind {
                        RowKind::Good => {}
                        RowKind::MissingClose => raw.close = None,
                        RowKind::BadDate => raw.date = Some("someday".into()),
                        RowKind::NegativeVolume => raw.volume = Some(-1.0),
                    }
                    (kind, raw)
                })
                .collect()
        },
    )
}

fn good_series() -> impl Strategy<Value = PriceSeries> {
    raw_rows().prop_map(|rows| {
        let good = rows
            .into_iter()
            .filter(|(kind, _)| matches!(kind, RowKind::Good))
            .map(|(_, raw)| raw)
            .collect();
        normalize("PROP", Period::OneYear, Ok(good))
    })
}

proptest! {
    #[test]
    fn normalize_keeps_exactly_the_well_formed_rows(rows in raw_rows()) {
        let expected = rows.iter().filter(|(kind, _)| matches!(kind, RowKind::Good)).count();
        let raw: Vec<RawBar> = rows.into_iter().map(|(_, raw)| raw).collect();

        let series = normalize("PROP", Period::OneYear, Ok(raw.clone()));
        prop_assert_eq!(series.len(), expected);

        // pure: same input, same output
        prop_assert_eq!(normalize("PROP", Period::OneYear, Ok(raw)), series.clone());

        // non-decreasing dates
        prop_assert!(series.bars().windows(2).all(|pair| pair[0].date <= pair[1].date));
    }

    #[test]
    fn moving_average_matches_naive_mean(series in good_series(), w in 1usize..40) {
        let window = NonZeroUsize::new(w).unwrap();
        let derived = moving_average(&series, window);
        let closes = series.closes();

        prop_assert_eq!(derived.len(), series.len());
        for (i, value) in derived.values().iter().enumerate() {
            if i + 1 < w {
                prop_assert!(value.is_none());
            } else {
                let expected = closes[i + 1 - w..=i].iter().sum::<f64>() / w as f64;
                let actual = value.expect("value once history suffices");
                prop_assert!((actual - expected).abs() <= 1e-9 * expected.abs().max(1.0));
            }
        }
    }

    #[test]
    fn filter_is_the_maximal_ordered_subsequence(series in good_series(), threshold in 0.0f64..2_500.0) {
        let filtered = filter_above(&series, threshold);

        prop_assert!(filtered.iter().all(|bar| bar.close > threshold));
        let expected: Vec<_> = series.iter().filter(|bar| bar.close > threshold).copied().collect();
        prop_assert_eq!(filtered.bars(), expected.as_slice());
        prop_assert_eq!(filtered.symbol(), series.symbol());
    }
}

#[test]
fn empty_input_stays_empty_through_the_pipeline() {
    let series = normalize("AAPL", Period::OneMonth, Ok(vec![]));
    assert!(series.is_empty());
    assert!(moving_average(&series, NonZeroUsize::new(7).unwrap()).is_empty());
    assert!(filter_above(&series, 100.0).is_empty());
}
