//! Per-topic commands for a single symbol.

use ndq_core::{HistoricalQuery, NasdaqClient, Symbol, TradeDate};
use serde::Serialize;
use serde_json::Value;

use crate::cli::{FinancialsArgs, HistoricalArgs, NewsArgs, SymbolArgs, SymbolDataArgs};
use crate::error::CliError;

/// Topic output tagged with the symbol it belongs to.
#[derive(Debug, Serialize)]
struct Tagged<'a, T> {
    symbol: &'a Symbol,
    #[serde(flatten)]
    data: T,
}

fn tagged<T: Serialize>(symbol: &Symbol, data: T) -> Result<Value, CliError> {
    Ok(serde_json::to_value(Tagged { symbol, data })?)
}

pub async fn quote(args: &SymbolArgs, client: &NasdaqClient) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    Ok(serde_json::to_value(client.get_quote(&symbol).await)?)
}

pub async fn dividends(args: &SymbolArgs, client: &NasdaqClient) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    tagged(&symbol, client.get_dividends(&symbol).await)
}

pub async fn ownership(args: &SymbolArgs, client: &NasdaqClient) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    tagged(&symbol, client.get_ownership(&symbol).await)
}

pub async fn analyst(args: &SymbolArgs, client: &NasdaqClient) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    tagged(&symbol, client.get_analyst_ratings(&symbol).await)
}

pub async fn short_interest(args: &SymbolArgs, client: &NasdaqClient) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    tagged(&symbol, client.get_short_interest(&symbol).await)
}

#[derive(Debug, Serialize)]
struct PeriodStatements<T> {
    period: &'static str,
    #[serde(flatten)]
    statements: T,
}

pub async fn financials(args: &FinancialsArgs, client: &NasdaqClient) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let statements = client.get_financials(&symbol, args.period).await;
    tagged(
        &symbol,
        PeriodStatements {
            period: args.period.as_str(),
            statements,
        },
    )
}

#[derive(Debug, Serialize)]
struct Bars {
    from: TradeDate,
    to: TradeDate,
    bars: Vec<ndq_core::PriceBar>,
}

pub async fn historical(args: &HistoricalArgs, client: &NasdaqClient) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let query = HistoricalQuery {
        from: args.from.as_deref().map(TradeDate::parse).transpose()?,
        to: args.to.as_deref().map(TradeDate::parse).transpose()?,
        period: args.period,
    };
    let (from, to) = query.window();
    if from > to {
        return Err(CliError::Command(format!(
            "history window starts after it ends: {from} > {to}"
        )));
    }

    let bars = client.get_historical(&symbol, query).await;
    tagged(&symbol, Bars { from, to, bars })
}

#[derive(Debug, Serialize)]
struct Articles {
    articles: Vec<ndq_core::NewsArticle>,
}

pub async fn news(args: &NewsArgs, client: &NasdaqClient) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let articles = client.get_news(&symbol, args.limit).await;
    tagged(&symbol, Articles { articles })
}

pub async fn symbol_data(args: &SymbolDataArgs, client: &NasdaqClient) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let data = client.get_symbol_data(&symbol, &args.include).await;
    Ok(serde_json::to_value(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::offline_client;
    use ndq_core::{DataSet, HistoryPeriod};

    #[tokio::test]
    async fn offline_quote_keeps_symbol_and_empty_fields() {
        let args = SymbolArgs {
            symbol: String::from("msft"),
        };

        let value = quote(&args, &offline_client()).await.expect("quote");

        assert_eq!(value["symbol"], "MSFT");
        assert!(value["price"].is_null());
        assert!(value.get("change_percent").is_some());
        assert!(value["week_52_high"].is_null());
    }

    #[tokio::test]
    async fn financials_report_the_period() {
        let args = FinancialsArgs {
            symbol: String::from("AAPL"),
            period: ndq_core::FinancialPeriod::Quarterly,
        };

        let value = financials(&args, &offline_client()).await.expect("financials");

        assert_eq!(value["period"], "quarterly");
        assert_eq!(value["income_statement"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn historical_dates_are_validated() {
        let args = HistoricalArgs {
            symbol: String::from("AAPL"),
            from: Some(String::from("04/01/2024")),
            to: None,
            period: HistoryPeriod::OneMonth,
        };

        let error = historical(&args, &offline_client()).await.expect_err("bad date");
        assert_eq!(error.exit_code(), 2);
    }

    #[tokio::test]
    async fn reversed_window_is_a_command_error() {
        let args = HistoricalArgs {
            symbol: String::from("AAPL"),
            from: Some(String::from("2024-05-01")),
            to: Some(String::from("2024-04-01")),
            period: HistoryPeriod::OneMonth,
        };

        let error = historical(&args, &offline_client()).await.expect_err("reversed");
        assert_eq!(error.exit_code(), 3);
    }

    #[tokio::test]
    async fn symbol_data_includes_only_requested_parts() {
        let args = SymbolDataArgs {
            symbol: String::from("AAPL"),
            include: vec![DataSet::News],
        };

        let value = symbol_data(&args, &offline_client()).await.expect("symbol data");

        assert_eq!(value["news"], serde_json::json!([]));
        assert!(value.get("quote").is_none());
    }
}
