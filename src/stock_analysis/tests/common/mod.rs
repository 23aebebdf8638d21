#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use async_trait::async_trait;
use stock_analysis::{
    models::{bar::RawBar, period::Period, request_params::HistoryRequest},
    providers::{DataProvider, ProviderError, ValidationSnafu},
};
use tempfile::TempDir;

/// Three January 2024 bars with closes 10, 20, 30.
pub fn three_bars() -> Vec<RawBar> {
    vec![
        RawBar::new("2024-01-01", 9.0, 11.0, 8.0, 10.0, 1_000.0),
        RawBar::new("2024-01-02", 10.0, 21.0, 9.0, 20.0, 2_000.0),
        RawBar::new("2024-01-03", 20.0, 31.0, 19.0, 30.0, 3_000.0),
    ]
}

/// `count` consecutive daily bars whose closes climb from `first_close` by 10.
pub fn rising_bars(count: usize, first_close: f64) -> Vec<RawBar> {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    start
        .iter_days()
        .take(count)
        .enumerate()
        .map(|(i, date)| {
            let close = first_close + 10.0 * i as f64;
            RawBar::new(
                &date.format("%Y-%m-%d").to_string(),
                close - 1.0,
                close + 1.0,
                close - 2.0,
                close,
                100.0,
            )
        })
        .collect()
}

/// What a [`ScriptedProvider`] answers.
pub enum Script {
    Rows(Vec<RawBar>),
    Fail,
}

/// In-memory provider that records every request it sees.
pub struct ScriptedProvider {
    script: Script,
    pub requests: Mutex<Vec<(String, Period)>>,
}

impl ScriptedProvider {
    pub fn rows(rows: Vec<RawBar>) -> Self {
        Self {
            script: Script::Rows(rows),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            script: Script::Fail,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl DataProvider for ScriptedProvider {
    async fn fetch_history(&self, request: &HistoryRequest) -> Result<Vec<RawBar>, ProviderError> {
        self.requests
            .lock()
            .unwrap()
            .push((request.symbol.clone(), request.period));
        match &self.script {
            Script::Rows(rows) => Ok(rows.clone()),
            Script::Fail => ValidationSnafu {
                message: "scripted failure",
            }
            .fail(),
        }
    }
}

/// A fixture directory laid out for `JsonFileProvider`.
pub struct Fixtures {
    _dir: TempDir, // keep alive for the life of the test
    pub root: PathBuf,
}

pub fn fixtures(files: &[(&str, Period, &[RawBar])]) -> Fixtures {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path().to_path_buf();
    for (symbol, period, rows) in files {
        write_rows(&root, symbol, *period, rows);
    }
    Fixtures { _dir: dir, root }
}

pub fn write_rows(root: &Path, symbol: &str, period: Period, rows: &[RawBar]) {
    let dir = root.join(symbol);
    std::fs::create_dir_all(&dir).expect("fixture dir");
    let body = serde_json::to_vec_pretty(rows).expect("serialize rows");
    std::fs::write(dir.join(format!("{period}.json")), body).expect("write fixture");
}
