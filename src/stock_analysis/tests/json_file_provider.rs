mod common;
use common::{fixtures, three_bars};

use stock_analysis::{
    models::{period::Period, request_params::HistoryRequest},
    normalize::normalize,
    providers::{DataProvider, ProviderError, json_file::JsonFileProvider},
};

#[tokio::test]
async fn reads_rows_for_symbol_and_period() {
    let fx = fixtures(&[("AAPL", Period::OneMonth, &three_bars())]);
    let provider = JsonFileProvider::new(&fx.root);

    let rows = provider
        .fetch_history(&HistoryRequest::new("aapl", Period::OneMonth))
        .await
        .expect("fixture rows");
    assert_eq!(rows, three_bars());
}

#[tokio::test]
async fn missing_file_is_a_read_error() {
    let fx = fixtures(&[("AAPL", Period::OneMonth, &three_bars())]);
    let provider = JsonFileProvider::new(&fx.root);

    let err = provider
        .fetch_history(&HistoryRequest::new("AAPL", Period::OneYear))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::ReadFile { .. }));
}

#[tokio::test]
async fn malformed_file_is_a_decode_error_and_normalizes_to_empty() {
    let fx = fixtures(&[]);
    std::fs::create_dir_all(fx.root.join("TSLA")).unwrap();
    std::fs::write(fx.root.join("TSLA").join("3mo.json"), b"{not json").unwrap();

    let provider = JsonFileProvider::new(&fx.root);
    let fetched = provider
        .fetch_history(&HistoryRequest::new("TSLA", Period::ThreeMonths))
        .await;
    assert!(matches!(fetched, Err(ProviderError::Decode { .. })));

    let series = normalize("TSLA", Period::ThreeMonths, fetched);
    assert!(series.is_empty());
}

#[tokio::test]
async fn accepts_vendor_field_spellings() {
    let fx = fixtures(&[]);
    std::fs::create_dir_all(fx.root.join("MSFT")).unwrap();
    std::fs::write(
        fx.root.join("MSFT").join("1y.json"),
        br#"[
            {"Date": "2024-01-02 00:00:00-05:00", "Open": 1, "High": 2, "Low": 0.5, "Close": 1.5, "Volume": 10},
            {"t": "2024-01-03T05:00:00Z", "o": 1, "h": 2, "l": 0.5, "c": 1.75, "v": 20}
        ]"#,
    )
    .unwrap();

    let provider = JsonFileProvider::new(&fx.root);
    let fetched = provider
        .fetch_history(&HistoryRequest::new("MSFT", Period::OneYear))
        .await;
    let series = normalize("MSFT", Period::OneYear, fetched);

    assert_eq!(series.dates(), vec!["2024-01-02", "2024-01-03"]);
    assert_eq!(series.closes(), vec![1.5, 1.75]);
}
