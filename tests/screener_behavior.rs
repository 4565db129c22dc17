//! Behavior tests for exchange-wide ticker lists.

use std::sync::Arc;

use ndq_core::screener::{fetch_all_exchanges, fetch_exchange_tickers};
use ndq_core::{unique_symbols, Exchange, ScreenerError};
use ndq_tests::{fetcher, screener_payload, ScriptedHttpClient};

#[tokio::test]
async fn failing_exchange_is_skipped() {
    // Given: NYSE is down while NASDAQ and AMEX answer
    let http = Arc::new(
        ScriptedHttpClient::new()
            .data("exchange=nasdaq", screener_payload(&["AAPL", "MSFT"]))
            .status("exchange=nyse", 503)
            .data("exchange=amex", screener_payload(&["XOM"])),
    );
    let fetcher = fetcher(&http);

    // When: fetching every exchange
    let tickers = fetch_all_exchanges(&fetcher).await.expect("some tickers");

    // Then: the two healthy exchanges are present and tagged
    assert_eq!(unique_symbols(&tickers), vec!["AAPL", "MSFT", "XOM"]);
    assert_eq!(tickers[0].exchange.as_deref(), Some("NASDAQ"));
    assert_eq!(tickers[2].exchange.as_deref(), Some("AMEX"));
    assert_eq!(http.requests().len(), 3);
}

#[tokio::test]
async fn all_exchanges_failing_is_an_error() {
    let http = Arc::new(ScriptedHttpClient::new().fail("/screener/stocks", "dns failure"));
    let fetcher = fetcher(&http);

    let result = fetch_all_exchanges(&fetcher).await;

    assert!(matches!(result, Err(ScreenerError::NoTickers)));
}

#[tokio::test]
async fn empty_lists_everywhere_is_an_error() {
    let http = Arc::new(ScriptedHttpClient::new().data("/screener/stocks", screener_payload(&[])));
    let fetcher = fetcher(&http);

    let result = fetch_all_exchanges(&fetcher).await;

    assert!(matches!(result, Err(ScreenerError::NoTickers)));
}

#[tokio::test]
async fn screener_request_uses_download_mode() {
    let http = Arc::new(
        ScriptedHttpClient::new().data("exchange=nyse", screener_payload(&["IBM", "GE"])),
    );
    let fetcher = fetcher(&http);

    let tickers = fetch_exchange_tickers(&fetcher, Exchange::Nyse)
        .await
        .expect("tickers");

    assert_eq!(tickers.len(), 2);
    assert_eq!(tickers[0].last_sale, Some(10.0));
    assert_eq!(tickers[0].volume, Some(1_000));

    let requests = http.requests();
    let request = requests.first().expect("one request");
    assert_eq!(request.query_value("download"), Some("true"));
    assert_eq!(request.query_value("tableonly"), Some("true"));
    assert_eq!(request.query_value("limit"), Some("10000"));
    assert_eq!(request.query_value("exchange"), Some("nyse"));
}

#[test]
fn unique_symbols_drop_cross_listed_duplicates() {
    let payload_a = screener_payload(&["AAPL", "BRK/A"]);
    let payload_b = screener_payload(&["AAPL"]);
    let mut tickers = Vec::new();
    for payload in [payload_a, payload_b] {
        let rows = payload["rows"].as_array().cloned().unwrap_or_default();
        tickers.extend(rows.into_iter().map(|row| ndq_core::Ticker {
            symbol: row["symbol"].as_str().unwrap_or_default().to_string(),
            ..ndq_core::Ticker::default()
        }));
    }

    assert_eq!(unique_symbols(&tickers), vec!["AAPL", "BRK/A"]);
}
