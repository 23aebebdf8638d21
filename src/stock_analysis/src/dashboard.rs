//! The fetch → normalize → derive → filter pass behind every dashboard
//! refresh.
//!
//! All inputs are explicit: a [`Selection`] names the symbol, period and
//! threshold, and each call to [`Dashboard::render`] recomputes everything from
//! one fresh fetch. Nothing is cached between passes.

use std::{num::NonZeroUsize, str::FromStr};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    filter::filter_above,
    metrics::moving_averages,
    models::{
        period::{Period, PeriodError},
        request_params::HistoryRequest,
        series::PriceSeries,
    },
    normalize::normalize,
    providers::DataProvider,
    views::{
        Candlestick, FilteredRow, MovingAverageChart, TableRow, candlestick, filtered_rows,
        moving_average_chart, table_rows,
    },
};

#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    #[error("Unknown symbol {symbol:?}; choose one of: {choices}")]
    UnknownSymbol { symbol: String, choices: String },

    #[error("Threshold {threshold} is outside [{min}, {max}]")]
    ThresholdOutOfRange { threshold: f64, min: f64, max: f64 },

    #[error("Invalid selection update {0:?}: expected symbol=<TICKER>, period=<PERIOD> or threshold=<PRICE>")]
    InvalidUpdate(String),

    #[error(transparent)]
    Period(#[from] PeriodError),
}

/// The user's current choices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub symbol: String,
    pub period: Period,
    pub threshold: f64,
}

impl Selection {
    /// The symbol is trimmed and uppercased.
    pub fn new(symbol: impl AsRef<str>, period: Period, threshold: f64) -> Self {
        Self {
            symbol: symbol.as_ref().trim().to_uppercase(),
            period,
            threshold,
        }
    }

    /// A copy of this selection with one choice changed.
    pub fn apply(&self, update: &SelectionUpdate) -> Selection {
        let mut next = self.clone();
        match update {
            SelectionUpdate::Symbol(symbol) => next.symbol = symbol.trim().to_uppercase(),
            SelectionUpdate::Period(period) => next.period = *period,
            SelectionUpdate::Threshold(threshold) => next.threshold = *threshold,
        }
        next
    }
}

/// A single change to a [`Selection`], parsed from `key=value` text.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionUpdate {
    Symbol(String),
    Period(Period),
    Threshold(f64),
}

impl FromStr for SelectionUpdate {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SelectionError::InvalidUpdate(s.to_string());
        let (key, value) = s
            .split_once('=')
            .or_else(|| s.trim().split_once(char::is_whitespace))
            .ok_or_else(invalid)?;
        let value = value.trim();
        if value.is_empty() {
            return Err(invalid());
        }

        match key.trim().to_lowercase().as_str() {
            "symbol" | "stock" => Ok(SelectionUpdate::Symbol(value.to_uppercase())),
            "period" | "time" => Ok(SelectionUpdate::Period(value.parse()?)),
            "threshold" | "price" => value
                .parse::<f64>()
                .ok()
                .filter(|t| t.is_finite())
                .map(SelectionUpdate::Threshold)
                .ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }
}

/// Everything the presentation layer draws for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub symbol: String,
    pub period: Period,
    pub threshold: f64,
    pub table: Vec<TableRow>,
    pub candlestick: Candlestick,
    pub moving_averages: MovingAverageChart,
    pub filtered: Vec<FilteredRow>,
}

/// Outcome of one dashboard pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardView {
    /// Nothing to show; the presentation layer prints a notice instead.
    NoData { symbol: String, period: Period },
    Ready(Box<DashboardData>),
}

impl DashboardView {
    pub fn is_ready(&self) -> bool {
        matches!(self, DashboardView::Ready(_))
    }
}

/// Derives every view from an already normalized series.
pub fn build_view(series: &PriceSeries, windows: &[NonZeroUsize], threshold: f64) -> DashboardView {
    if series.is_empty() {
        warn!(symbol = series.symbol(), period = %series.period(), "No stock data available");
        return DashboardView::NoData {
            symbol: series.symbol().to_string(),
            period: series.period(),
        };
    }

    let averages = moving_averages(series, windows);
    info!(symbol = series.symbol(), windows = averages.len(), "Moving averages calculated");

    let filtered = filter_above(series, threshold);
    info!(
        symbol = series.symbol(),
        threshold,
        records = filtered.len(),
        "Filtered records above threshold"
    );

    DashboardView::Ready(Box::new(DashboardData {
        symbol: series.symbol().to_string(),
        period: series.period(),
        threshold,
        table: table_rows(series),
        candlestick: candlestick(series),
        moving_averages: moving_average_chart(series, &averages),
        filtered: filtered_rows(&filtered),
    }))
}

/// Ties a [`DataProvider`] to the analysis pipeline.
pub struct Dashboard<P> {
    provider: P,
    windows: Vec<NonZeroUsize>,
}

impl<P: DataProvider> Dashboard<P> {
    pub fn new(provider: P, windows: Vec<NonZeroUsize>) -> Self {
        Self { provider, windows }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn windows(&self) -> &[NonZeroUsize] {
        &self.windows
    }

    /// Runs one full pass for `selection`, ending the history window now.
    pub async fn render(&self, selection: &Selection) -> DashboardView {
        self.render_request(&HistoryRequest::new(&selection.symbol, selection.period), selection.threshold)
            .await
    }

    /// Runs one full pass for an explicit request.
    pub async fn render_request(&self, request: &HistoryRequest, threshold: f64) -> DashboardView {
        info!(symbol = %request.symbol, period = %request.period, "Fetching stock data");
        let fetched = self.provider.fetch_history(request).await;
        let series = normalize(&request.symbol, request.period, fetched);
        build_view(&series, &self.windows, threshold)
    }
}
