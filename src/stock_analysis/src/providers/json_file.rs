//! Offline provider backed by JSON files.
//!
//! Layout: `<root>/<SYMBOL>/<period>.json`, each file a JSON array of
//! [`RawBar`] records, for example `fixtures/AAPL/1mo.json`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::{bar::RawBar, request_params::HistoryRequest},
    providers::{DataProvider, DecodeSnafu, ProviderError, ReadFileSnafu},
};

#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    root: PathBuf,
}

impl JsonFileProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding the rows for `request`.
    pub fn path_for(&self, request: &HistoryRequest) -> PathBuf {
        self.root
            .join(request.symbol.trim().to_uppercase())
            .join(format!("{}.json", request.period))
    }
}

#[async_trait]
impl DataProvider for JsonFileProvider {
    async fn fetch_history(&self, request: &HistoryRequest) -> Result<Vec<RawBar>, ProviderError> {
        let path = self.path_for(request);
        debug!(path = %path.display(), "reading price history file");

        let bytes = tokio::fs::read(&path)
            .await
            .context(ReadFileSnafu { path: path.clone() })?;
        serde_json::from_slice(&bytes).context(DecodeSnafu {
            what: path.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::period::Period;

    #[test]
    fn path_uses_uppercase_symbol_and_period() {
        let provider = JsonFileProvider::new("/data");
        let request = HistoryRequest::new("msft", Period::SixMonths);
        assert_eq!(provider.path_for(&request), PathBuf::from("/data/MSFT/6mo.json"));
    }
}
