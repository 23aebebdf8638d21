use indexmap::IndexMap;
use serde::Deserialize;

use crate::models::bar::RawBar;

/// One bar as Alpaca serializes it. Every field is optional and the timestamp
/// stays text, so a single odd bar is left for the normalizer to reject
/// instead of failing the page.
#[derive(Deserialize, Debug)]
pub struct AlpacaBar {
    #[serde(rename = "t")]
    pub timestamp: Option<String>,
    #[serde(rename = "o")]
    pub open: Option<f64>,
    #[serde(rename = "h")]
    pub high: Option<f64>,
    #[serde(rename = "l")]
    pub low: Option<f64>,
    #[serde(rename = "c")]
    pub close: Option<f64>,
    #[serde(rename = "v")]
    pub volume: Option<f64>,
    #[serde(rename = "n")]
    pub trade_count: Option<u64>,
    #[serde(rename = "vw")]
    pub vwap: Option<f64>,
}

impl From<AlpacaBar> for RawBar {
    fn from(bar: AlpacaBar) -> Self {
        RawBar {
            date: bar.timestamp,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

/// One page of the multi-symbol bars endpoint. `bars` is `null` when the
/// range holds no data.
#[derive(Deserialize, Debug)]
pub struct AlpacaResponse {
    #[serde(default)]
    pub bars: Option<IndexMap<String, Vec<AlpacaBar>>>,
    pub next_page_token: Option<String>,
}

/// Error body returned with non-2xx statuses.
#[derive(Deserialize, Debug)]
pub struct AlpacaErrorBody {
    pub message: String,
}
