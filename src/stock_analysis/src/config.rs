//! Application configuration: a TOML file with every field defaulted.
//!
//! ```toml
//! [dashboard]
//! symbols = ["AAPL", "GOOGL", "TSLA", "MSFT", "AMZN"]
//! default_symbol = "AAPL"
//! default_period = "1mo"
//! ma_windows = [7, 30]
//!
//! [threshold]
//! min = 100.0
//! max = 1000.0
//! default = 500.0
//!
//! [provider]
//! kind = "alpaca"
//! feed = "iex"
//! ```
//!
//! Credentials never live here; see [`AlpacaProvider::from_env`].

use std::{
    num::{NonZeroU32, NonZeroUsize},
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use shared_utils::config::{ConfigFileError, load_toml};
use thiserror::Error;

use crate::{
    dashboard::{Selection, SelectionError},
    metrics::{LONG_WINDOW, SHORT_WINDOW},
    models::period::Period,
    providers::{
        DataProvider, ProviderInitError,
        alpaca_rest::{
            AlpacaBarsParams, AlpacaProvider, AlpacaSettings,
            params::{Adjustment, Feed},
            provider::{BASE_URL, DEFAULT_REQUESTS_PER_MINUTE},
        },
        json_file::JsonFileProvider,
    },
};

/// Errors related to application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    File(#[from] ConfigFileError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    pub dashboard: DashboardCfg,
    pub threshold: ThresholdCfg,
    pub provider: ProviderCfg,
}

/// What the user may pick from and what is preselected.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DashboardCfg {
    pub symbols: Vec<String>,
    pub default_symbol: String,
    pub default_period: Period,
    pub ma_windows: Vec<NonZeroUsize>,
}

impl Default for DashboardCfg {
    fn default() -> Self {
        Self {
            symbols: ["AAPL", "GOOGL", "TSLA", "MSFT", "AMZN"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_symbol: "AAPL".to_string(),
            default_period: Period::OneMonth,
            ma_windows: vec![SHORT_WINDOW, LONG_WINDOW],
        }
    }
}

/// Bounds of the price threshold control.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ThresholdCfg {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl Default for ThresholdCfg {
    fn default() -> Self {
        Self {
            min: 100.0,
            max: 1000.0,
            default: 500.0,
        }
    }
}

impl ThresholdCfg {
    pub fn contains(&self, threshold: f64) -> bool {
        (self.min..=self.max).contains(&threshold)
    }
}

/// Which market data source to use.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ProviderCfg {
    Alpaca {
        #[serde(default = "default_base_url")]
        base_url: String,
        #[serde(default)]
        feed: Feed,
        #[serde(default)]
        adjustment: Adjustment,
        #[serde(default = "default_requests_per_minute")]
        requests_per_minute: NonZeroU32,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    JsonFile {
        root: PathBuf,
    },
}

fn default_base_url() -> String {
    BASE_URL.to_string()
}

fn default_requests_per_minute() -> NonZeroU32 {
    DEFAULT_REQUESTS_PER_MINUTE
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ProviderCfg {
    fn default() -> Self {
        ProviderCfg::Alpaca {
            base_url: default_base_url(),
            feed: Feed::default(),
            adjustment: Adjustment::default(),
            requests_per_minute: default_requests_per_minute(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProviderCfg {
    /// Instantiates the configured provider. Alpaca credentials come from the
    /// environment.
    pub fn build(&self) -> Result<Box<dyn DataProvider>, ProviderInitError> {
        match self {
            ProviderCfg::Alpaca {
                base_url,
                feed,
                adjustment,
                requests_per_minute,
                timeout_secs,
            } => {
                let settings = AlpacaSettings {
                    base_url: base_url.clone(),
                    defaults: AlpacaBarsParams {
                        feed: Some(*feed),
                        adjustment: Some(*adjustment),
                        ..Default::default()
                    },
                    requests_per_minute: *requests_per_minute,
                    timeout: Duration::from_secs(*timeout_secs),
                };
                Ok(Box::new(AlpacaProvider::from_env(settings)?))
            }
            ProviderCfg::JsonFile { root } => Ok(Box::new(JsonFileProvider::new(root.clone()))),
        }
    }
}

impl AppConfig {
    /// Loads and validates the file at `path`, or the defaults when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: AppConfig = match path {
            Some(path) => load_toml(path)?,
            None => AppConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            toml::from_str(raw).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let dashboard = &self.dashboard;
        if dashboard.symbols.is_empty() {
            return Err(ConfigError::Invalid("dashboard.symbols must not be empty".into()));
        }
        if let Some(bad) = dashboard.symbols.iter().find(|s| !is_ticker(s)) {
            return Err(ConfigError::Invalid(format!(
                "dashboard.symbols entry {bad:?} is not an uppercase ticker"
            )));
        }
        if !dashboard.symbols.contains(&dashboard.default_symbol) {
            return Err(ConfigError::Invalid(format!(
                "dashboard.default_symbol {:?} is not listed in dashboard.symbols",
                dashboard.default_symbol
            )));
        }
        if dashboard.ma_windows.is_empty() {
            return Err(ConfigError::Invalid("dashboard.ma_windows must not be empty".into()));
        }

        let t = &self.threshold;
        if !(t.min.is_finite() && t.max.is_finite() && t.default.is_finite()) {
            return Err(ConfigError::Invalid("threshold bounds must be finite".into()));
        }
        if t.min > t.max {
            return Err(ConfigError::Invalid(format!(
                "threshold.min ({}) exceeds threshold.max ({})",
                t.min, t.max
            )));
        }
        if !t.contains(t.default) {
            return Err(ConfigError::Invalid(format!(
                "threshold.default ({}) is outside [{}, {}]",
                t.default, t.min, t.max
            )));
        }

        match &self.provider {
            ProviderCfg::Alpaca { base_url, .. } if base_url.trim().is_empty() => Err(
                ConfigError::Invalid("provider.base_url must not be empty".into()),
            ),
            _ => Ok(()),
        }
    }

    /// The selection the dashboard opens with.
    pub fn default_selection(&self) -> Selection {
        Selection::new(
            self.dashboard.default_symbol.clone(),
            self.dashboard.default_period,
            self.threshold.default,
        )
    }

    /// Checks a selection against the configured choices.
    pub fn check_selection(&self, selection: &Selection) -> Result<(), SelectionError> {
        if !self.dashboard.symbols.contains(&selection.symbol) {
            return Err(SelectionError::UnknownSymbol {
                symbol: selection.symbol.clone(),
                choices: self.dashboard.symbols.join(", "),
            });
        }
        if !self.threshold.contains(selection.threshold) {
            return Err(SelectionError::ThresholdOutOfRange {
                threshold: selection.threshold,
                min: self.threshold.min,
                max: self.threshold.max,
            });
        }
        Ok(())
    }
}

fn is_ticker(symbol: &str) -> bool {
    !symbol.is_empty()
        && symbol.len() <= 10
        && symbol
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '.' || c == '-')
}
