use serde::{Deserialize, Serialize};

use crate::{
    models::request_params::{HistoryRequest, ProviderParams},
    providers::{ProviderError, ValidationSnafu},
};

/// Largest page Alpaca serves for the bars endpoint.
pub const MAX_PAGE_LIMIT: u32 = 10_000;

/// Specifies the corporate action adjustment for stock data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    #[default]
    Raw,
    Split,
    Dividend,
    All,
}

impl Adjustment {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Adjustment::Raw => "raw",
            Adjustment::Split => "split",
            Adjustment::Dividend => "dividend",
            Adjustment::All => "all",
        }
    }
}

/// Specifies the source feed for stock data.
///
/// Free accounts can only query `iex`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Feed {
    Sip,
    #[default]
    Iex,
    Otc,
}

impl Feed {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Feed::Sip => "sip",
            Feed::Iex => "iex",
            Feed::Otc => "otc",
        }
    }
}

/// Specifies the sort order for the bars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sort {
    #[default]
    Asc,
    Desc,
}

impl Sort {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Sort::Asc => "asc",
            Sort::Desc => "desc",
        }
    }
}

/// Alpaca-specific parameters for a bars request.
///
/// Unset fields fall back to the provider defaults configured in
/// [`AlpacaSettings`](super::AlpacaSettings).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct AlpacaBarsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<Adjustment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed: Option<Feed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
}

impl AlpacaBarsParams {
    /// Fills every unset field of `self` from `defaults`.
    pub fn or(&self, defaults: &AlpacaBarsParams) -> AlpacaBarsParams {
        AlpacaBarsParams {
            adjustment: self.adjustment.or(defaults.adjustment),
            feed: self.feed.or(defaults.feed),
            currency: self.currency.clone().or_else(|| defaults.currency.clone()),
            limit: self.limit.or(defaults.limit),
            sort: self.sort.or(defaults.sort),
        }
    }
}

/// Checks a request against the rules of the bars endpoint.
///
/// Descending order is rejected: the pipeline relies on time-ascending rows.
pub fn validate_request(request: &HistoryRequest, params: &AlpacaBarsParams) -> Result<(), ProviderError> {
    let symbol = request.symbol.trim();
    if symbol.is_empty() {
        return ValidationSnafu {
            message: "symbol must not be empty",
        }
        .fail();
    }
    if !symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return ValidationSnafu {
            message: format!("symbol {symbol:?} contains characters Alpaca does not accept"),
        }
        .fail();
    }
    if let Some(limit) = params
        .limit
        .filter(|limit| !(1..=MAX_PAGE_LIMIT).contains(limit))
    {
        return ValidationSnafu {
            message: format!("limit must be between 1 and {MAX_PAGE_LIMIT}, got {limit}"),
        }
        .fail();
    }
    if params.sort == Some(Sort::Desc) {
        return ValidationSnafu {
            message: "descending sort is not supported for price history",
        }
        .fail();
    }
    Ok(())
}

/// Merges the request's Alpaca options over `defaults`.
pub fn effective_params(request: &HistoryRequest, defaults: &AlpacaBarsParams) -> AlpacaBarsParams {
    match &request.provider_specific {
        ProviderParams::Alpaca(params) => params.or(defaults),
        ProviderParams::None => defaults.clone(),
    }
}

/// Builds the query string pairs for one page of daily bars.
pub fn construct_params(request: &HistoryRequest, params: &AlpacaBarsParams) -> Vec<(String, String)> {
    let mut query = vec![
        ("symbols".to_string(), request.symbol.trim().to_uppercase()),
        ("timeframe".to_string(), "1Day".to_string()),
        ("start".to_string(), request.start().to_rfc3339()),
        ("end".to_string(), request.end.to_rfc3339()),
    ];
    if let Some(adjustment) = params.adjustment {
        query.push(("adjustment".to_string(), adjustment.as_str().to_string()));
    }
    if let Some(feed) = params.feed {
        query.push(("feed".to_string(), feed.as_str().to_string()));
    }
    if let Some(currency) = &params.currency {
        query.push(("currency".to_string(), currency.clone()));
    }
    if let Some(limit) = params.limit {
        query.push(("limit".to_string(), limit.to_string()));
    }
    query.push((
        "sort".to_string(),
        params.sort.unwrap_or_default().as_str().to_string(),
    ));
    query
}
