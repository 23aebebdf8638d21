use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{models::period::Period, providers::alpaca_rest::AlpacaBarsParams};

/// Parameters for requesting the daily price history of one symbol.
///
/// This struct is vendor-agnostic. Each [`DataProvider`](crate::providers::DataProvider)
/// turns it into whatever its API expects.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryRequest {
    /// Ticker to request (e.g., `"AAPL"`).
    pub symbol: String,

    /// Lookback window ending at [`end`](Self::end).
    pub period: Period,

    /// End of the requested time range (UTC). Usually "now".
    pub end: DateTime<Utc>,

    /// Optional, provider-specific parameters.
    #[serde(default)]
    pub provider_specific: ProviderParams,
}

impl HistoryRequest {
    /// A request for `symbol` over `period` ending now.
    pub fn new(symbol: impl Into<String>, period: Period) -> Self {
        Self::ending_at(symbol, period, Utc::now())
    }

    pub fn ending_at(symbol: impl Into<String>, period: Period, end: DateTime<Utc>) -> Self {
        Self {
            symbol: symbol.into(),
            period,
            end,
            provider_specific: ProviderParams::None,
        }
    }

    /// Start of the requested time range (inclusive, UTC).
    pub fn start(&self) -> DateTime<Utc> {
        self.period.start_before(self.end)
    }
}

/// An enum to hold provider-specific request parameters.
///
/// This allows callers to specify detailed, per-request options for a
/// particular provider without cluttering the universal `HistoryRequest`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum ProviderParams {
    #[default]
    None,
    Alpaca(AlpacaBarsParams),
}
