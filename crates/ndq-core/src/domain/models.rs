use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::UtcDateTime;

/// Low/high pair split out of a vendor range string such as `"50.00 - 75.00"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: Option<f64>,
    pub high: Option<f64>,
}

/// Identity and listing details for the requested symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub symbol: Option<String>,
    pub fetched_at: Option<UtcDateTime>,
    pub company_name: Option<String>,
    pub stock_type: Option<String>,
    pub exchange: Option<String>,
    pub asset_class: Option<String>,
    pub market_status: Option<String>,
    pub is_nasdaq_listed: Option<bool>,
    pub is_nasdaq_100: Option<bool>,
}

/// Last-sale snapshot. `change_percent` is a decimal fraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub volume: Option<i64>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub bid_size: Option<i64>,
    pub ask_size: Option<i64>,
    pub previous_close: Option<f64>,
    pub timestamp: Option<String>,
    pub is_realtime: Option<bool>,
}

/// Quote enriched with the identity and 52-week range carried by the same
/// info payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub symbol: Option<String>,
    pub company_name: Option<String>,
    pub market_status: Option<String>,
    #[serde(flatten)]
    pub quote: Quote,
    pub week_52_high: Option<f64>,
    pub week_52_low: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub pe_ratio: Option<f64>,
    pub week_52_high: Option<f64>,
    pub week_52_low: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub shares_outstanding: Option<i64>,
    pub shares_outstanding_millions: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DividendSummary {
    #[serde(rename = "yield")]
    pub dividend_yield: Option<f64>,
    pub annual_amount: Option<f64>,
    pub payout_ratio: Option<f64>,
    pub ex_dividend_date: Option<String>,
    pub payment_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DividendEvent {
    pub ex_date: Option<String>,
    pub amount: Option<f64>,
    /// Lower-cased vendor dividend type, e.g. `"cash"`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub declaration_date: Option<String>,
    pub record_date: Option<String>,
    pub payment_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dividends {
    pub summary: DividendSummary,
    pub history: Vec<DividendEvent>,
}

/// One row of a price table. Dates are kept in the vendor's `MM/DD/YYYY` form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: Option<String>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPrices {
    pub daily: Vec<PriceBar>,
    pub period_5d: Vec<PriceBar>,
    pub period_1m: Vec<PriceBar>,
}

/// Statement line item; the remaining keys are the vendor's period columns
/// (`value2`, `value3`, ...) as described by [`FinancialStatements::period_headers`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub line_item: Option<String>,
    #[serde(flatten)]
    pub values: BTreeMap<String, Option<f64>>,
}

/// Ratio line; column values are decimal fractions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioRow {
    pub ratio_name: Option<String>,
    #[serde(flatten)]
    pub values: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatements {
    pub period_headers: BTreeMap<String, String>,
    pub income_statement: Vec<StatementRow>,
    pub balance_sheet: Vec<StatementRow>,
    pub cash_flow: Vec<StatementRow>,
    pub financial_ratios: Vec<RatioRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Financials {
    pub annual: FinancialStatements,
    pub quarterly: FinancialStatements,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstitutionalSummary {
    pub shares_outstanding_millions: Option<i64>,
    pub institutional_ownership_percent: Option<f64>,
    pub total_value_millions: Option<f64>,
    pub total_institutional_holders: Option<i64>,
    pub total_shares_held: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstitutionalHolder {
    pub institution: Option<String>,
    pub shares: Option<i64>,
    pub change: Option<i64>,
    pub change_percent: Option<f64>,
    pub value_thousands: Option<f64>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Institutional {
    pub summary: InstitutionalSummary,
    pub top_holders: Vec<InstitutionalHolder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsiderTrade {
    pub date: Option<String>,
    pub insider: Option<String>,
    pub title: Option<String>,
    pub transaction: Option<String>,
    pub shares: Option<i64>,
    pub price: Option<f64>,
    pub shares_held: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ownership {
    pub institutional: Institutional,
    pub insider_trades: Vec<InsiderTrade>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalystData {
    pub peg_ratio: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub growth_rate: Option<f64>,
}

/// Most recent settlement row of the short-interest table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortInterest {
    pub settlement_date: Option<String>,
    pub shares_short: Option<i64>,
    pub avg_daily_volume: Option<i64>,
    pub days_to_cover: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecFiling {
    pub date_filed: Option<String>,
    pub form_type: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PressRelease {
    pub date: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub publisher: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub date: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub publisher: Option<String>,
    pub related_symbols: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct News {
    pub press_releases: Vec<PressRelease>,
    pub articles: Vec<NewsArticle>,
}

/// Normalized composite record. All eleven sections are always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSymbolRecord {
    pub metadata: Metadata,
    pub quote: Quote,
    pub key_metrics: KeyMetrics,
    pub dividends: Dividends,
    pub historical_prices: HistoricalPrices,
    pub financials: Financials,
    pub ownership: Ownership,
    pub analyst_data: AnalystData,
    pub short_interest: ShortInterest,
    pub sec_filings: Vec<SecFiling>,
    pub news: News,
}

impl NormalizedSymbolRecord {
    /// Section names in serialization order.
    pub const SECTIONS: [&'static str; 11] = [
        "metadata",
        "quote",
        "key_metrics",
        "dividends",
        "historical_prices",
        "financials",
        "ownership",
        "analyst_data",
        "short_interest",
        "sec_filings",
        "news",
    ];
}
