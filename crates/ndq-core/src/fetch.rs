//! Fetch layer: one vendor request per data category.
//!
//! Every method returns the `data` sub-object of the vendor envelope. The
//! aggregate [`Fetcher::fetch_all_symbol_data`] folds failures into absent
//! payloads so a single symbol fetch never fails as a whole.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::endpoints::Endpoints;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{Category, Exchange, RawSymbolRecord, Symbol, TradeDate, UtcDateTime, ValidationError};

const ACCEPT: &str = "application/json, text/plain, */*";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const DEFAULT_ASSET_CLASS: &str = "stocks";

/// Limit used for list categories by the aggregate fetch.
pub const AGGREGATE_LIST_LIMIT: u32 = 50;
/// Limit used for daily history by the aggregate fetch.
pub const AGGREGATE_HISTORY_LIMIT: u32 = 100;
/// Rows requested from the screener in download mode.
pub const SCREENER_DOWNLOAD_LIMIT: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    Transport,
    Timeout,
    Status,
    Decode,
    MissingPayload,
}

/// Why a single category request produced no payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn timeout(after: Duration) -> Self {
        Self {
            kind: FetchErrorKind::Timeout,
            message: format!("request timed out after {} ms", after.as_millis()),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            kind: FetchErrorKind::Status,
            message: format!("unexpected HTTP status {status}"),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Decode,
            message: message.into(),
        }
    }

    pub fn missing_payload(vendor_message: Option<String>) -> Self {
        let message = match vendor_message {
            Some(detail) => format!("response carried no data: {detail}"),
            None => String::from("response carried no data"),
        };
        Self {
            kind: FetchErrorKind::MissingPayload,
            message,
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Transport => "fetch.transport",
            FetchErrorKind::Timeout => "fetch.timeout",
            FetchErrorKind::Status => "fetch.status",
            FetchErrorKind::Decode => "fetch.decode",
            FetchErrorKind::MissingPayload => "fetch.missing_payload",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message)
    }
}

impl std::error::Error for FetchError {}

/// Query shared by the quote-scoped categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteParams {
    pub asset_class: String,
}

impl Default for QuoteParams {
    fn default() -> Self {
        Self {
            asset_class: DEFAULT_ASSET_CLASS.to_string(),
        }
    }
}

/// Daily price history window. Unset dates resolve at request time to the
/// last 30 days ending today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalParams {
    pub asset_class: String,
    pub from: Option<TradeDate>,
    pub to: Option<TradeDate>,
    pub limit: u32,
}

impl Default for HistoricalParams {
    fn default() -> Self {
        Self {
            asset_class: DEFAULT_ASSET_CLASS.to_string(),
            from: None,
            to: None,
            limit: 10,
        }
    }
}

impl HistoricalParams {
    fn resolved_dates(&self) -> (TradeDate, TradeDate) {
        let today = TradeDate::today();
        let from = self.from.unwrap_or_else(|| today.days_before(30));
        let to = self.to.unwrap_or(today);
        (from, to)
    }
}

/// Intraday ("no closing price") history window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NocpTimeframe {
    #[default]
    FiveDays,
    OneMonth,
}

impl NocpTimeframe {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FiveDays => "d5",
            Self::OneMonth => "m1",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FinancialPeriod {
    #[default]
    Annual,
    Quarterly,
}

impl FinancialPeriod {
    pub const fn frequency(self) -> u8 {
        match self {
            Self::Annual => 1,
            Self::Quarterly => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
        }
    }
}

impl Display for FinancialPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinancialPeriod {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "annual" | "1" => Ok(Self::Annual),
            "quarterly" | "2" => Ok(Self::Quarterly),
            _ => Err(ValidationError::InvalidFinancialPeriod {
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldingsParams {
    pub limit: u32,
    pub holding_type: String,
    pub sort_column: String,
}

impl Default for HoldingsParams {
    fn default() -> Self {
        Self {
            limit: 10,
            holding_type: String::from("TOTAL"),
            sort_column: String::from("marketValue"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsiderParams {
    pub limit: u32,
    pub trade_type: String,
    pub sort_column: String,
    pub sort_order: String,
}

impl Default for InsiderParams {
    fn default() -> Self {
        Self {
            limit: 10,
            trade_type: String::from("all"),
            sort_column: String::from("lastDate"),
            sort_order: String::from("DESC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecFilingsParams {
    pub limit: u32,
    pub sort_column: String,
    pub sort_order: String,
}

impl Default for SecFilingsParams {
    fn default() -> Self {
        Self {
            limit: 14,
            sort_column: String::from("filed"),
            sort_order: String::from("desc"),
        }
    }
}

/// Paging for both news categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsParams {
    pub asset_class: String,
    pub limit: u32,
    pub offset: u32,
}

impl Default for NewsParams {
    fn default() -> Self {
        Self {
            asset_class: DEFAULT_ASSET_CLASS.to_string(),
            limit: 10,
            offset: 0,
        }
    }
}

impl NewsParams {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}

/// Issues vendor requests through an [`HttpClient`].
#[derive(Clone)]
pub struct Fetcher {
    http: Arc<dyn HttpClient>,
    endpoints: Endpoints,
    timeout: Duration,
}

impl Fetcher {
    /// Fetcher backed by reqwest.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new(config)))
    }

    pub fn with_http_client(config: &ClientConfig, http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            endpoints: Endpoints::from_config(config),
            timeout: config.timeout,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub async fn fetch_symbol_info(
        &self,
        symbol: &Symbol,
        params: &QuoteParams,
    ) -> Result<Value, FetchError> {
        let request = HttpRequest::get(self.endpoints.quote_info(symbol))
            .with_query("assetclass", params.asset_class.as_str());
        self.fetch(Category::Info.as_str(), symbol.as_str(), request)
            .await
    }

    pub async fn fetch_symbol_dividends(
        &self,
        symbol: &Symbol,
        params: &QuoteParams,
    ) -> Result<Value, FetchError> {
        let request = HttpRequest::get(self.endpoints.dividends(symbol))
            .with_query("assetclass", params.asset_class.as_str());
        self.fetch(Category::Dividends.as_str(), symbol.as_str(), request)
            .await
    }

    pub async fn fetch_symbol_historical(
        &self,
        symbol: &Symbol,
        params: &HistoricalParams,
    ) -> Result<Value, FetchError> {
        let (from, to) = params.resolved_dates();
        let request = HttpRequest::get(self.endpoints.historical(symbol))
            .with_query("assetclass", params.asset_class.as_str())
            .with_query("fromdate", from.format_iso())
            .with_query("todate", to.format_iso())
            .with_query("limit", params.limit.to_string());
        self.fetch(Category::Historical.as_str(), symbol.as_str(), request)
            .await
    }

    pub async fn fetch_company_historical_nocp(
        &self,
        symbol: &Symbol,
        timeframe: NocpTimeframe,
    ) -> Result<Value, FetchError> {
        let category = match timeframe {
            NocpTimeframe::FiveDays => Category::Historical5d,
            NocpTimeframe::OneMonth => Category::Historical1m,
        };
        let request = HttpRequest::get(self.endpoints.historical_nocp(symbol))
            .with_query("timeframe", timeframe.as_str());
        self.fetch(category.as_str(), symbol.as_str(), request).await
    }

    pub async fn fetch_company_financials(
        &self,
        symbol: &Symbol,
        period: FinancialPeriod,
    ) -> Result<Value, FetchError> {
        let category = match period {
            FinancialPeriod::Annual => Category::FinancialsAnnual,
            FinancialPeriod::Quarterly => Category::FinancialsQuarterly,
        };
        let request = HttpRequest::get(self.endpoints.financials(symbol))
            .with_query("frequency", period.frequency().to_string());
        self.fetch(category.as_str(), symbol.as_str(), request).await
    }

    pub async fn fetch_analyst_peg_ratio(&self, symbol: &Symbol) -> Result<Value, FetchError> {
        let request = HttpRequest::get(self.endpoints.peg_ratio(symbol));
        self.fetch(Category::PegRatio.as_str(), symbol.as_str(), request)
            .await
    }

    pub async fn fetch_short_interest(
        &self,
        symbol: &Symbol,
        params: &QuoteParams,
    ) -> Result<Value, FetchError> {
        let request = HttpRequest::get(self.endpoints.short_interest(symbol))
            .with_query("assetClass", params.asset_class.as_str());
        self.fetch(Category::ShortInterest.as_str(), symbol.as_str(), request)
            .await
    }

    pub async fn fetch_institutional_holdings(
        &self,
        symbol: &Symbol,
        params: &HoldingsParams,
    ) -> Result<Value, FetchError> {
        let request = HttpRequest::get(self.endpoints.institutional_holdings(symbol))
            .with_query("limit", params.limit.to_string())
            .with_query("type", params.holding_type.as_str())
            .with_query("sortColumn", params.sort_column.as_str());
        self.fetch(
            Category::InstitutionalHoldings.as_str(),
            symbol.as_str(),
            request,
        )
        .await
    }

    pub async fn fetch_insider_trades(
        &self,
        symbol: &Symbol,
        params: &InsiderParams,
    ) -> Result<Value, FetchError> {
        let request = HttpRequest::get(self.endpoints.insider_trades(symbol))
            .with_query("limit", params.limit.to_string())
            .with_query("type", params.trade_type.as_str())
            .with_query("sortColumn", params.sort_column.as_str())
            .with_query("sortOrder", params.sort_order.as_str());
        self.fetch(Category::InsiderTrades.as_str(), symbol.as_str(), request)
            .await
    }

    pub async fn fetch_sec_filings(
        &self,
        symbol: &Symbol,
        params: &SecFilingsParams,
    ) -> Result<Value, FetchError> {
        let request = HttpRequest::get(self.endpoints.sec_filings(symbol))
            .with_query("limit", params.limit.to_string())
            .with_query("sortColumn", params.sort_column.as_str())
            .with_query("sortOrder", params.sort_order.as_str())
            .with_query("IsQuoteMedia", "true");
        self.fetch(Category::SecFilings.as_str(), symbol.as_str(), request)
            .await
    }

    /// Press releases are searched with `symbol:<lower>|assetclass:<class>`.
    pub async fn fetch_press_releases(
        &self,
        symbol: &Symbol,
        params: &NewsParams,
    ) -> Result<Value, FetchError> {
        let query = format!(
            "symbol:{}|assetclass:{}",
            symbol.to_lowercase(),
            params.asset_class
        );
        let request = HttpRequest::get(self.endpoints.press_releases())
            .with_query("q", query)
            .with_query("limit", params.limit.to_string())
            .with_query("offset", params.offset.to_string());
        self.fetch(Category::PressReleases.as_str(), symbol.as_str(), request)
            .await
    }

    /// Articles are searched with `<SYMBOL>|<CLASS>`, both upper-cased.
    pub async fn fetch_news_articles(
        &self,
        symbol: &Symbol,
        params: &NewsParams,
    ) -> Result<Value, FetchError> {
        let query = format!("{}|{}", symbol, params.asset_class.to_ascii_uppercase());
        let request = HttpRequest::get(self.endpoints.news_articles())
            .with_query("q", query)
            .with_query("offset", params.offset.to_string())
            .with_query("limit", params.limit.to_string())
            .with_query("fallback", "true");
        self.fetch(Category::NewsArticles.as_str(), symbol.as_str(), request)
            .await
    }

    /// Screener table in download mode, optionally limited to one exchange.
    pub async fn fetch_screener(
        &self,
        exchange: Option<Exchange>,
        limit: u32,
        offset: u32,
    ) -> Result<Value, FetchError> {
        let mut request = HttpRequest::get(self.endpoints.screener())
            .with_query("tableonly", "true")
            .with_query("limit", limit.to_string())
            .with_query("offset", offset.to_string());
        if let Some(exchange) = exchange {
            request = request.with_query("exchange", exchange.as_str());
        }
        let request = request.with_query("download", "true");
        let subject = exchange.map_or("ALL", Exchange::label);
        self.fetch("screener", subject, request).await
    }

    /// Fetch all 14 categories concurrently.
    ///
    /// Never fails: categories that could not be fetched are left absent in
    /// the returned record.
    pub async fn fetch_all_symbol_data(&self, symbol: &Symbol) -> RawSymbolRecord {
        let quote = QuoteParams::default();
        let history = HistoricalParams {
            limit: AGGREGATE_HISTORY_LIMIT,
            ..HistoricalParams::default()
        };
        let holdings = HoldingsParams {
            limit: AGGREGATE_LIST_LIMIT,
            ..HoldingsParams::default()
        };
        let insiders = InsiderParams {
            limit: AGGREGATE_LIST_LIMIT,
            ..InsiderParams::default()
        };
        let filings = SecFilingsParams {
            limit: AGGREGATE_LIST_LIMIT,
            ..SecFilingsParams::default()
        };
        let news = NewsParams::with_limit(AGGREGATE_LIST_LIMIT);

        let fetched_at = UtcDateTime::now();
        let (
            info,
            dividends,
            historical,
            historical_5d,
            historical_1m,
            financials_annual,
            financials_quarterly,
            peg_ratio,
            short_interest,
            institutional_holdings,
            insider_trades,
            sec_filings,
            press_releases,
            news_articles,
        ) = tokio::join!(
            self.fetch_symbol_info(symbol, &quote),
            self.fetch_symbol_dividends(symbol, &quote),
            self.fetch_symbol_historical(symbol, &history),
            self.fetch_company_historical_nocp(symbol, NocpTimeframe::FiveDays),
            self.fetch_company_historical_nocp(symbol, NocpTimeframe::OneMonth),
            self.fetch_company_financials(symbol, FinancialPeriod::Annual),
            self.fetch_company_financials(symbol, FinancialPeriod::Quarterly),
            self.fetch_analyst_peg_ratio(symbol),
            self.fetch_short_interest(symbol, &quote),
            self.fetch_institutional_holdings(symbol, &holdings),
            self.fetch_insider_trades(symbol, &insiders),
            self.fetch_sec_filings(symbol, &filings),
            self.fetch_press_releases(symbol, &news),
            self.fetch_news_articles(symbol, &news),
        );

        let mut record = RawSymbolRecord::new(symbol.clone(), fetched_at);
        for (category, result) in [
            (Category::Info, info),
            (Category::Dividends, dividends),
            (Category::Historical, historical),
            (Category::Historical5d, historical_5d),
            (Category::Historical1m, historical_1m),
            (Category::FinancialsAnnual, financials_annual),
            (Category::FinancialsQuarterly, financials_quarterly),
            (Category::PegRatio, peg_ratio),
            (Category::ShortInterest, short_interest),
            (Category::InstitutionalHoldings, institutional_holdings),
            (Category::InsiderTrades, insider_trades),
            (Category::SecFilings, sec_filings),
            (Category::PressReleases, press_releases),
            (Category::NewsArticles, news_articles),
        ] {
            record.set_payload(category, result.ok());
        }

        tracing::info!(
            symbol = %symbol,
            fetched = record.available_count(),
            total = Category::ALL.len(),
            "fetched symbol data categories"
        );
        record
    }

    async fn fetch(
        &self,
        context: &'static str,
        subject: &str,
        request: HttpRequest,
    ) -> Result<Value, FetchError> {
        let result = self.execute(request).await;
        if let Err(error) = &result {
            tracing::warn!(
                category = context,
                symbol = subject,
                code = error.code(),
                error = %error.message(),
                "vendor request failed"
            );
        }
        result
    }

    async fn execute(&self, request: HttpRequest) -> Result<Value, FetchError> {
        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
        let request = request
            .with_header("Accept", ACCEPT)
            .with_header("Accept-Language", ACCEPT_LANGUAGE)
            .with_timeout_ms(timeout_ms);

        tracing::debug!(url = %request.full_url(), "issuing vendor request");

        let response = tokio::time::timeout(self.timeout, self.http.execute(request))
            .await
            .map_err(|_| FetchError::timeout(self.timeout))?
            .map_err(|error| {
                if error.timed_out() {
                    FetchError::timeout(self.timeout)
                } else {
                    FetchError::transport(error.message())
                }
            })?;

        if !response.is_success() {
            return Err(FetchError::status(response.status));
        }

        extract_data(&response.body)
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("endpoints", &self.endpoints)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Pull `data` out of the vendor envelope `{data, message, status}`.
fn extract_data(body: &str) -> Result<Value, FetchError> {
    let mut document: Value = serde_json::from_str(body)
        .map_err(|error| FetchError::decode(format!("invalid JSON body: {error}")))?;

    let data = document
        .get_mut("data")
        .map(Value::take)
        .unwrap_or(Value::Null);
    if data.is_null() {
        return Err(FetchError::missing_payload(vendor_message(&document)));
    }
    Ok(data)
}

/// Error text from `status.bCodeMessage`, which the vendor sends either as
/// a list of `{code, errorMessage}` objects or as a plain string.
fn vendor_message(document: &Value) -> Option<String> {
    match document.pointer("/status/bCodeMessage")? {
        Value::String(message) if !message.trim().is_empty() => Some(message.trim().to_string()),
        Value::Array(entries) => {
            let messages = entries
                .iter()
                .filter_map(|entry| entry.get("errorMessage").and_then(Value::as_str))
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .collect::<Vec<_>>();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_data_member() {
        let data = extract_data(r#"{"data":{"symbol":"AAPL"},"status":{"rCode":200}}"#)
            .expect("payload");
        assert_eq!(data, json!({"symbol": "AAPL"}));
    }

    #[test]
    fn null_data_reports_vendor_message() {
        let body = r#"{"data":null,"status":{"rCode":400,"bCodeMessage":[{"code":1001,"errorMessage":"Symbol not exists"}]}}"#;
        let error = extract_data(body).expect_err("no payload");

        assert_eq!(error.kind(), FetchErrorKind::MissingPayload);
        assert_eq!(error.message(), "response carried no data: Symbol not exists");
    }

    #[test]
    fn missing_data_without_vendor_message() {
        let error = extract_data(r#"{"status":{"bCodeMessage":null}}"#).expect_err("no payload");
        assert_eq!(error.message(), "response carried no data");
        assert_eq!(error.code(), "fetch.missing_payload");
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let error = extract_data("<html>blocked</html>").expect_err("not json");
        assert_eq!(error.kind(), FetchErrorKind::Decode);
    }

    #[test]
    fn parameter_defaults_match_vendor_site() {
        assert_eq!(HoldingsParams::default().limit, 10);
        assert_eq!(InsiderParams::default().sort_order, "DESC");
        assert_eq!(SecFilingsParams::default().limit, 14);
        assert_eq!(NewsParams::default().offset, 0);
        assert_eq!(HistoricalParams::default().limit, 10);
    }

    #[test]
    fn default_history_window_is_thirty_days() {
        let (from, to) = HistoricalParams::default().resolved_dates();
        assert_eq!(to, TradeDate::today());
        assert_eq!(from, TradeDate::today().days_before(30));
    }

    #[test]
    fn financial_period_parses_names_and_frequencies() {
        assert_eq!("Quarterly".parse::<FinancialPeriod>(), Ok(FinancialPeriod::Quarterly));
        assert_eq!("1".parse::<FinancialPeriod>(), Ok(FinancialPeriod::Annual));
        assert!("monthly".parse::<FinancialPeriod>().is_err());
        assert_eq!(FinancialPeriod::Quarterly.frequency(), 2);
    }

    #[test]
    fn error_display_includes_code() {
        let error = FetchError::status(503);
        assert_eq!(error.to_string(), "fetch.status: unexpected HTTP status 503");
    }
}
