//! Historical stock price analysis.
//!
//! A [`DataProvider`](providers::DataProvider) fetches raw daily bars, the
//! [normalizer](normalize::normalize) turns them into a
//! [`PriceSeries`](models::series::PriceSeries), and the pure functions in
//! [`metrics`], [`filter`] and [`views`] derive everything a dashboard shows.
//! [`dashboard`] strings the steps together for one user selection.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod filter;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod normalize;
pub mod providers;
pub mod views;

use config::AppConfig;
use dashboard::Dashboard;
use errors::Error;
use providers::DataProvider;

/// Builds the configured provider and wraps it in a [`Dashboard`].
pub fn dashboard_from_config(config: &AppConfig) -> Result<Dashboard<Box<dyn DataProvider>>, Error> {
    let provider = config.provider.build()?;
    Ok(Dashboard::new(provider, config.dashboard.ma_windows.clone()))
}
