use stock_analysis::{
    models::{
        period::Period,
        request_params::{HistoryRequest, ProviderParams},
    },
    normalize::normalize,
    providers::{
        DataProvider,
        alpaca_rest::{
            AlpacaProvider,
            params::{AlpacaBarsParams, Feed},
        },
    },
};
use serial_test::serial;

#[tokio::test]
#[serial]
#[ignore]
async fn test_alpaca_provider_fetch_history() {
    dotenvy::dotenv().ok();
    // This test requires APCA_API_KEY_ID and APCA_API_SECRET_KEY to be set in the environment.
    if std::env::var("APCA_API_KEY_ID").is_err() || std::env::var("APCA_API_SECRET_KEY").is_err() {
        println!("Skipping test_alpaca_provider_fetch_history: API keys not set.");
        return;
    }

    let provider = AlpacaProvider::new().expect("Failed to create AlpacaProvider");

    let mut request = HistoryRequest::new("AAPL", Period::OneMonth);
    request.provider_specific = ProviderParams::Alpaca(AlpacaBarsParams {
        feed: Some(Feed::Iex),
        limit: Some(5),
        ..Default::default()
    });

    let result = provider.fetch_history(&request).await;
    assert!(result.is_ok(), "fetch_history returned an error: {:?}", result.err());

    let series = normalize("AAPL", Period::OneMonth, result);
    // a month holds roughly 20 sessions; a page limit of 5 forces pagination
    assert!(series.len() > 5, "Expected pagination to collect more than one page");
    assert!(series.bars().windows(2).all(|pair| pair[0].date <= pair[1].date));
}
