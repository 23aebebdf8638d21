//! Alpaca Markets REST provider (`/v2/stocks/bars`).

pub mod params;
pub mod provider;
pub mod response;

pub use params::AlpacaBarsParams;
pub use provider::{AlpacaProvider, AlpacaSettings};
