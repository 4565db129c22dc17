//! Exchange-wide ticker lists from the stock screener.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use crate::fetch::{FetchError, Fetcher, SCREENER_DOWNLOAD_LIMIT};
use crate::parse::{number_value, percentage_value, text_value, volume_value};
use crate::{Exchange, Ticker};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScreenerError {
    #[error("no ticker lists could be fetched from any exchange")]
    NoTickers,
}

/// Every ticker listed on one exchange, tagged with its upper-case name.
pub async fn fetch_exchange_tickers(
    fetcher: &Fetcher,
    exchange: Exchange,
) -> Result<Vec<Ticker>, FetchError> {
    let payload = fetcher
        .fetch_screener(Some(exchange), SCREENER_DOWNLOAD_LIMIT, 0)
        .await?;

    let tickers = tickers_from_payload(&payload, Some(exchange));
    if tickers.is_empty() {
        tracing::warn!(exchange = exchange.label(), "screener returned no rows");
    } else {
        tracing::info!(
            exchange = exchange.label(),
            count = tickers.len(),
            "fetched exchange tickers"
        );
    }
    Ok(tickers)
}

/// NASDAQ, NYSE and AMEX in that order. Exchanges that fail are skipped;
/// the call fails only when nothing at all was fetched.
pub async fn fetch_all_exchanges(fetcher: &Fetcher) -> Result<Vec<Ticker>, ScreenerError> {
    let mut all = Vec::new();
    let mut fetched_from = Vec::new();

    for exchange in Exchange::ALL {
        match fetch_exchange_tickers(fetcher, exchange).await {
            Ok(tickers) => {
                fetched_from.push(exchange.label());
                all.extend(tickers);
            }
            Err(error) => {
                tracing::error!(
                    exchange = exchange.label(),
                    error = %error,
                    "failed to fetch exchange ticker list"
                );
            }
        }
    }

    if all.is_empty() {
        return Err(ScreenerError::NoTickers);
    }

    tracing::info!(
        total = all.len(),
        exchanges = %fetched_from.join(", "),
        "fetched ticker lists"
    );
    Ok(all)
}

/// Distinct symbols in first-seen order.
pub fn unique_symbols(tickers: &[Ticker]) -> Vec<String> {
    let mut seen = HashSet::new();
    tickers
        .iter()
        .filter(|ticker| seen.insert(ticker.symbol.as_str()))
        .map(|ticker| ticker.symbol.clone())
        .collect()
}

/// Keep tickers whose sector matches, ignoring case.
pub fn filter_by_sector(tickers: Vec<Ticker>, sector: &str) -> Vec<Ticker> {
    let wanted = sector.trim().to_lowercase();
    tickers
        .into_iter()
        .filter(|ticker| {
            ticker
                .sector
                .as_deref()
                .is_some_and(|value| value.trim().to_lowercase() == wanted)
        })
        .collect()
}

/// Rows live under `rows` in download mode and `table.rows` otherwise.
/// Rows without a symbol are dropped.
pub(crate) fn tickers_from_payload(payload: &Value, exchange: Option<Exchange>) -> Vec<Ticker> {
    let rows = payload
        .get("rows")
        .and_then(Value::as_array)
        .or_else(|| payload.pointer("/table/rows").and_then(Value::as_array));

    rows.into_iter()
        .flatten()
        .filter_map(|row| ticker_from_row(row, exchange))
        .collect()
}

fn ticker_from_row(row: &Value, exchange: Option<Exchange>) -> Option<Ticker> {
    let symbol = row.get("symbol")?.as_str()?.trim();
    if symbol.is_empty() {
        return None;
    }

    Some(Ticker {
        symbol: symbol.to_string(),
        name: text_value(row.get("name")),
        last_sale: number_value(row.get("lastsale")),
        net_change: number_value(row.get("netchange")),
        pct_change: percentage_value(row.get("pctchange")),
        volume: volume_value(row.get("volume")),
        market_cap: number_value(row.get("marketCap")),
        country: text_value(row.get("country")),
        ipo_year: text_value(row.get("ipoyear")),
        industry: text_value(row.get("industry")),
        sector: text_value(row.get("sector")),
        url: text_value(row.get("url")),
        exchange: exchange
            .map(|exchange| exchange.label().to_string())
            .or_else(|| text_value(row.get("exchange"))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ticker(symbol: &str) -> Ticker {
        Ticker {
            symbol: symbol.to_string(),
            ..Ticker::default()
        }
    }

    #[test]
    fn unique_symbols_keep_first_seen_order() {
        let tickers = [ticker("MSFT"), ticker("AAPL"), ticker("MSFT"), ticker("GOOG"), ticker("AAPL")];
        assert_eq!(unique_symbols(&tickers), vec!["MSFT", "AAPL", "GOOG"]);
    }

    #[test]
    fn rows_are_tagged_with_exchange() {
        let payload = json!({"rows": [
            {
                "symbol": "AAPL",
                "name": "Apple Inc. Common Stock",
                "lastsale": "$169.30",
                "netchange": "-4.20",
                "pctchange": "-2.421%",
                "volume": "50,383,147",
                "marketCap": "2,614,223,780,000.00",
                "country": "United States",
                "ipoyear": "1980",
                "industry": "Computer Manufacturing",
                "sector": "Technology",
                "url": "/market-activity/stocks/aapl"
            },
            {"name": "missing symbol"}
        ]});

        let tickers = tickers_from_payload(&payload, Some(Exchange::Nasdaq));
        assert_eq!(tickers.len(), 1);
        let apple = &tickers[0];
        assert_eq!(apple.exchange.as_deref(), Some("NASDAQ"));
        assert_eq!(apple.last_sale, Some(169.30));
        assert_eq!(apple.volume, Some(50_383_147));
        assert_eq!(apple.market_cap, Some(2_614_223_780_000.0));
        assert_eq!(apple.ipo_year.as_deref(), Some("1980"));
    }

    #[test]
    fn table_rows_are_read_when_not_in_download_mode() {
        let payload = json!({"table": {"rows": [{"symbol": "IBM"}]}});
        let tickers = tickers_from_payload(&payload, None);
        assert_eq!(tickers.len(), 1);
        assert_eq!(tickers[0].exchange, None);
    }

    #[test]
    fn sector_filter_ignores_case() {
        let mut tech = ticker("AAPL");
        tech.sector = Some(String::from("Technology"));
        let mut energy = ticker("XOM");
        energy.sector = Some(String::from("Energy"));

        let filtered = filter_by_sector(vec![tech, energy, ticker("NONE")], "technology");
        assert_eq!(unique_symbols(&filtered), vec!["AAPL"]);
    }
}
