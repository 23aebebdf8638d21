//! Series normalizer: the single point where a raw fetch outcome becomes a
//! [`PriceSeries`].
//!
//! Every way of not having data (transport failure, an empty answer, rows that
//! are all unusable) collapses into an empty series here. Callers downstream
//! only ever see "bars" or "no bars".

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    models::{
        bar::{DATE_FORMAT, PriceBar, RawBar},
        period::Period,
        series::PriceSeries,
    },
    providers::ProviderError,
};

/// Why a fetch produced no usable bars.
///
/// Never escapes this module: [`normalize`] turns it into an empty series.
#[derive(Debug, Error)]
pub(crate) enum DataUnavailable {
    #[error("fetch failed: {0}")]
    Fetch(#[source] ProviderError),

    #[error("provider returned no rows")]
    NoRows,

    #[error("all {rejected} rows were malformed")]
    AllRowsMalformed { rejected: usize },
}

/// Why a single raw row was dropped.
#[derive(Debug, Error, PartialEq)]
pub enum RowDefect {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` is not a finite number: {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("unparseable date {0:?}")]
    InvalidDate(String),

    #[error("volume {0} is not a non-negative whole number")]
    InvalidVolume(f64),

    #[error("date {0} breaks the chronological order of the series")]
    OutOfOrder(NaiveDate),
}

/// Normalizes a fetch outcome for `symbol` over `period`.
///
/// Rows stay in source order. Malformed rows are skipped one by one and logged;
/// nothing is deduplicated or gap-filled. A failed fetch, an empty fetch and a
/// fetch with no well-formed row all yield an empty series.
pub fn normalize(
    symbol: &str,
    period: Period,
    fetched: Result<Vec<RawBar>, ProviderError>,
) -> PriceSeries {
    match try_normalize(fetched) {
        Ok(bars) => {
            info!(symbol, %period, records = bars.len(), "Successfully fetched records");
            PriceSeries::from_ordered_bars(symbol.to_string(), period, bars)
        }
        Err(DataUnavailable::Fetch(err)) => {
            error!(symbol, %period, error = %err, "Error fetching data");
            PriceSeries::empty(symbol, period)
        }
        Err(reason) => {
            warn!(symbol, %period, %reason, "No data fetched");
            PriceSeries::empty(symbol, period)
        }
    }
}

pub(crate) fn try_normalize(
    fetched: Result<Vec<RawBar>, ProviderError>,
) -> Result<Vec<PriceBar>, DataUnavailable> {
    let rows = fetched.map_err(DataUnavailable::Fetch)?;
    if rows.is_empty() {
        return Err(DataUnavailable::NoRows);
    }

    let mut parsed: Vec<(usize, PriceBar)> = Vec::with_capacity(rows.len());
    let mut rejected = 0usize;
    for (index, row) in rows.iter().enumerate() {
        match normalize_row(row) {
            Ok(bar) => parsed.push((index, bar)),
            Err(defect) => {
                rejected += 1;
                warn!(index, %defect, "skipping malformed row");
            }
        }
    }

    let dates: Vec<NaiveDate> = parsed.iter().map(|(_, bar)| bar.date).collect();
    let ordered = longest_ordered_run(&dates);
    let mut keep = vec![false; parsed.len()];
    for &position in &ordered {
        keep[position] = true;
    }

    let mut bars = Vec::with_capacity(ordered.len());
    for ((index, bar), kept) in parsed.into_iter().zip(keep) {
        if kept {
            bars.push(bar);
        } else {
            rejected += 1;
            let defect = RowDefect::OutOfOrder(bar.date);
            warn!(index, %defect, "skipping malformed row");
        }
    }

    if bars.is_empty() {
        return Err(DataUnavailable::AllRowsMalformed { rejected });
    }
    Ok(bars)
}

/// Positions of the longest subsequence of `dates` that never goes backwards.
///
/// A single mis-dated row is dropped instead of every row that follows it.
/// Among runs of equal length the one ending on the smallest date wins.
fn longest_ordered_run(dates: &[NaiveDate]) -> Vec<usize> {
    // tails[k] is the position ending the best run of length k + 1 found so far.
    let mut tails: Vec<usize> = Vec::new();
    let mut parent: Vec<Option<usize>> = vec![None; dates.len()];
    for (position, date) in dates.iter().enumerate() {
        let slot = tails.partition_point(|&tail| dates[tail] <= *date);
        parent[position] = slot.checked_sub(1).map(|k| tails[k]);
        if slot == tails.len() {
            tails.push(position);
        } else {
            tails[slot] = position;
        }
    }

    let mut run = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(position) = cursor {
        run.push(position);
        cursor = parent[position];
    }
    run.reverse();
    run
}

/// Validates one raw row in isolation.
pub fn normalize_row(raw: &RawBar) -> Result<PriceBar, RowDefect> {
    let date_text = raw.date.as_deref().ok_or(RowDefect::MissingField("date"))?;
    let date = parse_date(date_text).ok_or_else(|| RowDefect::InvalidDate(date_text.to_string()))?;

    let volume = price_field("volume", raw.volume)?;
    if volume < 0.0 || volume.fract() != 0.0 || volume >= u64::MAX as f64 {
        return Err(RowDefect::InvalidVolume(volume));
    }

    Ok(PriceBar {
        date,
        open: price_field("open", raw.open)?,
        high: price_field("high", raw.high)?,
        low: price_field("low", raw.low)?,
        close: price_field("close", raw.close)?,
        volume: volume as u64,
    })
}

fn price_field(field: &'static str, value: Option<f64>) -> Result<f64, RowDefect> {
    let value = value.ok_or(RowDefect::MissingField(field))?;
    if !value.is_finite() {
        return Err(RowDefect::NonFinite { field, value });
    }
    Ok(value)
}

/// Parses the date spellings vendors use into a calendar date.
///
/// Timestamps keep the calendar date of their own offset, so
/// `2024-01-02 00:00:00-05:00` is January 2nd.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(ts.date_naive());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|ts| ts.date())
}
