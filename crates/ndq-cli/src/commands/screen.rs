use ndq_core::{unique_symbols, NasdaqClient};
use serde_json::{json, Value};

use crate::cli::{ScreenArgs, TickersArgs};
use crate::error::CliError;

pub async fn screen(args: &ScreenArgs, client: &NasdaqClient) -> Result<Value, CliError> {
    let tickers = client
        .search_symbols(args.exchange, args.sector.as_deref())
        .await;
    if tickers.is_empty() {
        tracing::warn!("screener returned no matching tickers");
    }

    Ok(json!({
        "exchange": args.exchange.map(|exchange| exchange.label()),
        "sector": args.sector,
        "count": tickers.len(),
        "tickers": tickers,
    }))
}

pub async fn tickers(args: &TickersArgs, client: &NasdaqClient) -> Result<Value, CliError> {
    let tickers = client.fetch_all_exchanges().await?;

    if args.unique {
        let symbols = unique_symbols(&tickers);
        return Ok(json!({"count": symbols.len(), "symbols": symbols}));
    }
    Ok(json!({"count": tickers.len(), "tickers": tickers}))
}
