use std::{num::NonZeroU32, time::Duration};

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_secret_env_var;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::{bar::RawBar, request_params::HistoryRequest},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, DecodeSnafu, InvalidApiKeySnafu, MissingEnvVarSnafu,
        ProviderError, ProviderInitError, ReqwestSnafu, ValidationSnafu,
        alpaca_rest::{
            params::{AlpacaBarsParams, construct_params, effective_params, validate_request},
            response::{AlpacaErrorBody, AlpacaResponse},
        },
    },
};

pub const BASE_URL: &str = "https://data.alpaca.markets/v2/stocks/bars";
pub const API_KEY_ENV: &str = "APCA_API_KEY_ID";
pub const SECRET_KEY_ENV: &str = "APCA_API_SECRET_KEY";

/// Alpaca's documented limit for the free plan.
pub const DEFAULT_REQUESTS_PER_MINUTE: NonZeroU32 = nonzero!(200u32);

/// Connection settings for [`AlpacaProvider`].
#[derive(Clone, Debug)]
pub struct AlpacaSettings {
    /// Bars endpoint URL.
    pub base_url: String,
    /// Options applied to every request unless the request overrides them.
    pub defaults: AlpacaBarsParams,
    /// Client-side cap on page requests.
    pub requests_per_minute: NonZeroU32,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

impl Default for AlpacaSettings {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            defaults: AlpacaBarsParams::default(),
            requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct AlpacaProvider {
    client: Client,
    base_url: String,
    defaults: AlpacaBarsParams,
    limiter: DefaultDirectRateLimiter,
    _api_key: SecretString,
    _secret_key: SecretString,
}

impl AlpacaProvider {
    /// Creates a new Alpaca provider with default settings.
    ///
    /// Reads API keys from the `APCA_API_KEY_ID` and `APCA_API_SECRET_KEY`
    /// environment variables.
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::from_env(AlpacaSettings::default())
    }

    /// Like [`new`](Self::new), with explicit connection settings.
    pub fn from_env(settings: AlpacaSettings) -> Result<Self, ProviderInitError> {
        let api_key = get_secret_env_var(API_KEY_ENV).context(MissingEnvVarSnafu)?;
        let secret_key = get_secret_env_var(SECRET_KEY_ENV).context(MissingEnvVarSnafu)?;
        Self::with_credentials(settings, api_key, secret_key)
    }

    pub fn with_credentials(
        settings: AlpacaSettings,
        api_key: SecretString,
        secret_key: SecretString,
    ) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        let mut key_value =
            header::HeaderValue::from_str(api_key.expose_secret()).context(InvalidApiKeySnafu)?;
        key_value.set_sensitive(true);
        headers.insert("APCA-API-KEY-ID", key_value);

        let mut secret_value =
            header::HeaderValue::from_str(secret_key.expose_secret()).context(InvalidApiKeySnafu)?;
        secret_value.set_sensitive(true);
        headers.insert("APCA-API-SECRET-KEY", secret_value);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: settings.base_url,
            defaults: settings.defaults,
            limiter: RateLimiter::direct(Quota::per_minute(settings.requests_per_minute)),
            _api_key: api_key,
            _secret_key: secret_key,
        })
    }
}

#[async_trait]
impl DataProvider for AlpacaProvider {
    async fn fetch_history(&self, request: &HistoryRequest) -> Result<Vec<RawBar>, ProviderError> {
        let params = effective_params(request, &self.defaults);
        validate_request(request, &params)?;

        let symbol = request.symbol.trim().to_uppercase();
        let mut rows: Vec<RawBar> = Vec::new();
        let mut next_page_token: Option<String> = None;
        let mut page = 0usize;

        loop {
            let mut query_params = construct_params(request, &params);
            if let Some(token) = &next_page_token {
                query_params.push(("page_token".to_string(), token.clone()));
            }

            self.limiter.until_ready().await;
            page += 1;
            debug!(%symbol, page, "requesting Alpaca bars page");

            let response = self
                .client
                .get(&self.base_url)
                .query(&query_params)
                .send()
                .await
                .context(ReqwestSnafu)?;

            let status = response.status();
            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown API error".to_string());
                let message = serde_json::from_str::<AlpacaErrorBody>(&body)
                    .map(|err| err.message)
                    .unwrap_or(body);
                return ApiSnafu {
                    status: status.as_u16(),
                    message,
                }
                .fail();
            }

            let bytes = response.bytes().await.context(ReqwestSnafu)?;
            let alpaca_response: AlpacaResponse =
                serde_json::from_slice(&bytes).context(DecodeSnafu {
                    what: "Alpaca bars response",
                })?;

            // The endpoint is multi-symbol; only our symbol's entry matters.
            let page_bars = alpaca_response
                .bars
                .and_then(|mut bars| bars.swap_remove(&symbol))
                .unwrap_or_default();
            rows.extend(page_bars.into_iter().map(RawBar::from));

            match advance_page_token(next_page_token.as_deref(), alpaca_response.next_page_token)? {
                Some(token) => next_page_token = Some(token),
                None => break,
            }
        }

        debug!(%symbol, pages = page, rows = rows.len(), "Alpaca bars fetched");
        Ok(rows)
    }
}

/// Token for the next page, or `None` once the last page is read.
///
/// A server that hands back the token it was just given would keep the loop
/// spinning on one page forever.
fn advance_page_token(
    current: Option<&str>,
    incoming: Option<String>,
) -> Result<Option<String>, ProviderError> {
    match incoming {
        Some(token) if current == Some(token.as_str()) => ValidationSnafu {
            message: format!("Alpaca repeated page token {token:?}"),
        }
        .fail(),
        other => Ok(other),
    }
}
