use thiserror::Error;

use crate::{config::ConfigError, dashboard::SelectionError, providers::ProviderInitError};

/// The unified error type for the `stock_analysis` crate.
///
/// Data problems never show up here: a failed or empty fetch is an empty
/// series, not an error. These are setup and input mistakes.
#[derive(Debug, Error)]
pub enum Error {
    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The configured provider could not be created.
    #[error("Provider error: {0}")]
    ProviderInit(#[from] ProviderInitError),

    /// The user picked something the configuration does not offer.
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// A generic I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// Output could not be serialized.
    #[error("Serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
