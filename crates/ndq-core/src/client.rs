//! High-level client returning normalized data.
//!
//! Every getter degrades to the section's empty default when the vendor is
//! unreachable or returns something unusable; only invalid caller input
//! (rejected while parsing [`Symbol`], [`DataSet`] or [`HistoryPeriod`])
//! is an error.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::fetch::{
    FetchError, Fetcher, FinancialPeriod, HistoricalParams, HoldingsParams, InsiderParams,
    NewsParams, QuoteParams, AGGREGATE_HISTORY_LIMIT, AGGREGATE_LIST_LIMIT,
    SCREENER_DOWNLOAD_LIMIT,
};
use crate::http_client::HttpClient;
use crate::normalize::{self, isolate};
use crate::screener::{self, ScreenerError};
use crate::{
    AnalystData, Category, Dividends, Exchange, FinancialStatements, NewsArticle,
    NormalizedSymbolRecord, Ownership, PriceBar, QuoteSnapshot, RawSymbolRecord, ShortInterest, Symbol,
    Ticker, TradeDate, UtcDateTime, ValidationError,
};

/// Upper bound on articles per news request.
pub const MAX_NEWS_LIMIT: u32 = 50;
/// Articles requested when the caller does not say.
pub const DEFAULT_NEWS_LIMIT: u32 = 20;

/// One part of [`NasdaqClient::get_symbol_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSet {
    Quote,
    Financials,
    Dividends,
    Ownership,
    Historical,
    News,
    Analyst,
    ShortInterest,
}

impl DataSet {
    pub const ALL: [DataSet; 8] = [
        Self::Quote,
        Self::Financials,
        Self::Dividends,
        Self::Ownership,
        Self::Historical,
        Self::News,
        Self::Analyst,
        Self::ShortInterest,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::Financials => "financials",
            Self::Dividends => "dividends",
            Self::Ownership => "ownership",
            Self::Historical => "historical",
            Self::News => "news",
            Self::Analyst => "analyst",
            Self::ShortInterest => "short_interest",
        }
    }
}

impl Display for DataSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSet {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|set| set.as_str() == normalized)
            .ok_or_else(|| ValidationError::InvalidDataSet {
                value: value.to_string(),
            })
    }
}

/// Look-back window used when a history query has no start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HistoryPeriod {
    OneDay,
    FiveDays,
    #[default]
    OneMonth,
    ThreeMonths,
    OneYear,
}

impl HistoryPeriod {
    pub const fn days(self) -> i64 {
        match self {
            Self::OneDay => 1,
            Self::FiveDays => 5,
            Self::OneMonth => 30,
            Self::ThreeMonths => 90,
            Self::OneYear => 365,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1day",
            Self::FiveDays => "5day",
            Self::OneMonth => "1month",
            Self::ThreeMonths => "3month",
            Self::OneYear => "1year",
        }
    }
}

impl Display for HistoryPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryPeriod {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1day" => Ok(Self::OneDay),
            "5day" => Ok(Self::FiveDays),
            "1month" => Ok(Self::OneMonth),
            "3month" => Ok(Self::ThreeMonths),
            "1year" => Ok(Self::OneYear),
            _ => Err(ValidationError::InvalidHistoryPeriod {
                value: value.to_string(),
            }),
        }
    }
}

/// Daily history window. Missing dates resolve against today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoricalQuery {
    pub from: Option<TradeDate>,
    pub to: Option<TradeDate>,
    pub period: HistoryPeriod,
}

impl HistoricalQuery {
    pub fn window(&self) -> (TradeDate, TradeDate) {
        let today = TradeDate::today();
        let to = self.to.unwrap_or(today);
        let from = self
            .from
            .unwrap_or_else(|| today.days_before(self.period.days()));
        (from, to)
    }
}

/// Result of [`NasdaqClient::get_symbol_data`]. Only requested parts are set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolData {
    pub symbol: Symbol,
    pub fetched_at: UtcDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<QuoteSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financials: Option<FinancialStatements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividends: Option<Dividends>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ownership: Option<Ownership>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical: Option<Vec<PriceBar>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news: Option<Vec<NewsArticle>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyst: Option<AnalystData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_interest: Option<ShortInterest>,
}

/// Entry point for callers that want normalized data per topic or in bulk.
#[derive(Debug, Clone)]
pub struct NasdaqClient {
    fetcher: Fetcher,
}

impl Default for NasdaqClient {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl NasdaqClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            fetcher: Fetcher::new(config),
        }
    }

    pub fn from_env() -> Self {
        Self::new(&ClientConfig::from_env())
    }

    pub fn with_http_client(config: &ClientConfig, http: Arc<dyn HttpClient>) -> Self {
        Self {
            fetcher: Fetcher::with_http_client(config, http),
        }
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// Quote, identity and 52-week range, all from one info request.
    pub async fn get_quote(&self, symbol: &Symbol) -> QuoteSnapshot {
        let info = self
            .fetcher
            .fetch_symbol_info(symbol, &QuoteParams::default())
            .await;
        let record = partial_record(symbol, [(Category::Info, info)]);

        let metadata = isolate("metadata", &record, normalize::normalize_metadata);
        let key_metrics = isolate("key_metrics", &record, normalize::normalize_key_metrics);
        QuoteSnapshot {
            symbol: metadata.symbol,
            company_name: metadata.company_name,
            market_status: metadata.market_status,
            quote: isolate("quote", &record, normalize::normalize_quote),
            week_52_high: key_metrics.week_52_high,
            week_52_low: key_metrics.week_52_low,
        }
    }

    pub async fn get_financials(
        &self,
        symbol: &Symbol,
        period: FinancialPeriod,
    ) -> FinancialStatements {
        let category = match period {
            FinancialPeriod::Annual => Category::FinancialsAnnual,
            FinancialPeriod::Quarterly => Category::FinancialsQuarterly,
        };
        let payload = self.fetcher.fetch_company_financials(symbol, period).await;
        let record = partial_record(symbol, [(category, payload)]);

        let financials = isolate("financials", &record, normalize::normalize_financials);
        match period {
            FinancialPeriod::Annual => financials.annual,
            FinancialPeriod::Quarterly => financials.quarterly,
        }
    }

    pub async fn get_dividends(&self, symbol: &Symbol) -> Dividends {
        let payload = self
            .fetcher
            .fetch_symbol_dividends(symbol, &QuoteParams::default())
            .await;
        let record = partial_record(symbol, [(Category::Dividends, payload)]);
        isolate("dividends", &record, normalize::normalize_dividends)
    }

    /// Institutional holders and insider trades, requested 50 rows deep.
    pub async fn get_ownership(&self, symbol: &Symbol) -> Ownership {
        let holdings = HoldingsParams {
            limit: AGGREGATE_LIST_LIMIT,
            ..HoldingsParams::default()
        };
        let insiders = InsiderParams {
            limit: AGGREGATE_LIST_LIMIT,
            ..InsiderParams::default()
        };
        let (holdings, trades) = tokio::join!(
            self.fetcher.fetch_institutional_holdings(symbol, &holdings),
            self.fetcher.fetch_insider_trades(symbol, &insiders),
        );
        let record = partial_record(
            symbol,
            [
                (Category::InstitutionalHoldings, holdings),
                (Category::InsiderTrades, trades),
            ],
        );
        isolate("ownership", &record, normalize::normalize_ownership)
    }

    pub async fn get_historical(&self, symbol: &Symbol, query: HistoricalQuery) -> Vec<PriceBar> {
        let (from, to) = query.window();
        let params = HistoricalParams {
            from: Some(from),
            to: Some(to),
            limit: AGGREGATE_HISTORY_LIMIT,
            ..HistoricalParams::default()
        };
        let payload = self.fetcher.fetch_symbol_historical(symbol, &params).await;
        let record = partial_record(symbol, [(Category::Historical, payload)]);
        isolate("historical_prices", &record, normalize::normalize_historical_prices).daily
    }

    /// Recent articles; `limit` is capped at [`MAX_NEWS_LIMIT`].
    pub async fn get_news(&self, symbol: &Symbol, limit: u32) -> Vec<NewsArticle> {
        let params = NewsParams::with_limit(limit.min(MAX_NEWS_LIMIT));
        let payload = self.fetcher.fetch_news_articles(symbol, &params).await;
        let record = partial_record(symbol, [(Category::NewsArticles, payload)]);
        isolate("news", &record, normalize::normalize_news).articles
    }

    pub async fn get_analyst_ratings(&self, symbol: &Symbol) -> AnalystData {
        let payload = self.fetcher.fetch_analyst_peg_ratio(symbol).await;
        let record = partial_record(symbol, [(Category::PegRatio, payload)]);
        isolate("analyst_data", &record, normalize::normalize_analyst_data)
    }

    pub async fn get_short_interest(&self, symbol: &Symbol) -> ShortInterest {
        let payload = self
            .fetcher
            .fetch_short_interest(symbol, &QuoteParams::default())
            .await;
        let record = partial_record(symbol, [(Category::ShortInterest, payload)]);
        isolate("short_interest", &record, normalize::normalize_short_interest)
    }

    /// Fetch the requested data sets concurrently. An empty selection means
    /// every data set.
    pub async fn get_symbol_data(&self, symbol: &Symbol, include: &[DataSet]) -> SymbolData {
        let wants = |set: DataSet| include.is_empty() || include.contains(&set);
        let fetched_at = UtcDateTime::now();

        let (quote, financials, dividends, ownership, historical, news, analyst, short_interest) = tokio::join!(
            async {
                if wants(DataSet::Quote) {
                    Some(self.get_quote(symbol).await)
                } else {
                    None
                }
            },
            async {
                if wants(DataSet::Financials) {
                    Some(self.get_financials(symbol, FinancialPeriod::Annual).await)
                } else {
                    None
                }
            },
            async {
                if wants(DataSet::Dividends) {
                    Some(self.get_dividends(symbol).await)
                } else {
                    None
                }
            },
            async {
                if wants(DataSet::Ownership) {
                    Some(self.get_ownership(symbol).await)
                } else {
                    None
                }
            },
            async {
                if wants(DataSet::Historical) {
                    Some(self.get_historical(symbol, HistoricalQuery::default()).await)
                } else {
                    None
                }
            },
            async {
                if wants(DataSet::News) {
                    Some(self.get_news(symbol, DEFAULT_NEWS_LIMIT).await)
                } else {
                    None
                }
            },
            async {
                if wants(DataSet::Analyst) {
                    Some(self.get_analyst_ratings(symbol).await)
                } else {
                    None
                }
            },
            async {
                if wants(DataSet::ShortInterest) {
                    Some(self.get_short_interest(symbol).await)
                } else {
                    None
                }
            },
        );

        SymbolData {
            symbol: symbol.clone(),
            fetched_at,
            quote,
            financials,
            dividends,
            ownership,
            historical,
            news,
            analyst,
            short_interest,
        }
    }

    /// Screener listing, optionally narrowed to one exchange and a sector.
    /// An unreachable screener yields an empty list.
    pub async fn search_symbols(
        &self,
        exchange: Option<Exchange>,
        sector: Option<&str>,
    ) -> Vec<Ticker> {
        let payload = match self
            .fetcher
            .fetch_screener(exchange, SCREENER_DOWNLOAD_LIMIT, 0)
            .await
        {
            Ok(payload) => payload,
            Err(_) => return Vec::new(),
        };

        let tickers = screener::tickers_from_payload(&payload, exchange);
        match sector {
            Some(sector) => screener::filter_by_sector(tickers, sector),
            None => tickers,
        }
    }

    /// All 14 raw categories for `symbol`.
    pub async fn fetch_all_symbol_data(&self, symbol: &Symbol) -> RawSymbolRecord {
        self.fetcher.fetch_all_symbol_data(symbol).await
    }

    pub async fn fetch_normalized(&self, symbol: &Symbol) -> NormalizedSymbolRecord {
        let raw = self.fetch_all_symbol_data(symbol).await;
        normalize::normalize_symbol_data(&raw)
    }

    pub async fn fetch_all_exchanges(&self) -> Result<Vec<Ticker>, ScreenerError> {
        screener::fetch_all_exchanges(&self.fetcher).await
    }
}

fn partial_record<const N: usize>(
    symbol: &Symbol,
    payloads: [(Category, Result<Value, FetchError>); N],
) -> RawSymbolRecord {
    let mut record = RawSymbolRecord::new(symbol.clone(), UtcDateTime::now());
    for (category, payload) in payloads {
        record.set_payload(category, payload.ok());
    }
    record
}
