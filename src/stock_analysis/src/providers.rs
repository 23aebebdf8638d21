//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, the seam between the
//! analysis pipeline and whatever vendor actually serves price history.
//! A provider only moves rows: it returns [`RawBar`]s exactly as the vendor
//! sent them and leaves validation to the
//! [normalizer](crate::normalize::normalize).
//!
//! Two implementations ship with the crate:
//! - [`alpaca_rest::AlpacaProvider`] for the Alpaca Markets REST API.
//! - [`json_file::JsonFileProvider`] for offline fixtures on disk.
//!
//! The trait is async and object safe, so a provider can be picked at
//! runtime from configuration and held as `Box<dyn DataProvider>`.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use stock_analysis::models::{bar::RawBar, request_params::HistoryRequest};
//! use stock_analysis::providers::{DataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl DataProvider for MyProvider {
//!     async fn fetch_history(
//!         &self,
//!         _request: &HistoryRequest,
//!     ) -> Result<Vec<RawBar>, ProviderError> {
//!         Ok(vec![])
//!     }
//! }
//! ```

pub mod alpaca_rest;
pub mod json_file;

use std::path::PathBuf;

use async_trait::async_trait;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::models::{bar::RawBar, request_params::HistoryRequest};

/// Trait for fetching daily price history from a market data provider.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches the raw rows for one symbol over one period.
    ///
    /// # Returns
    ///
    /// * `Ok(rows)` - The rows in time-ascending order. An empty vector means
    ///   the provider answered but had nothing for this request.
    /// * `Err(ProviderError)` - The request could not be completed.
    async fn fetch_history(&self, request: &HistoryRequest) -> Result<Vec<RawBar>, ProviderError>;
}

#[async_trait]
impl<P: DataProvider + ?Sized> DataProvider for Box<P> {
    async fn fetch_history(&self, request: &HistoryRequest) -> Result<Vec<RawBar>, ProviderError> {
        (**self).fetch_history(request).await
    }
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// missed environment variable.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// API key contains invalid characters.
    #[snafu(display("Invalid API key format: {source}"))]
    InvalidApiKey {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider's API returned a specific error message (e.g., invalid API key).
    #[snafu(display("API error ({status}): {message}"))]
    Api {
        status: u16,
        message: String,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// A local data file could not be read.
    #[snafu(display("Failed to read {}: {source}", path.display()))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// A response body or data file did not have the expected shape.
    #[snafu(display("Failed to decode {what}: {source}"))]
    Decode {
        what: String,
        source: serde_json::Error,
        backtrace: Backtrace,
    },
}
