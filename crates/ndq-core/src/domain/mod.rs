//! # Domain Models
//!
//! Caller-facing types produced by the normalization layer.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`NormalizedSymbolRecord`] | Eleven-section composite for one symbol |
//! | [`Quote`] | Last sale, change, bid/ask |
//! | [`QuoteSnapshot`] | Quote plus name, market status and 52-week range |
//! | [`Financials`] | Annual and quarterly statement tables |
//! | [`Ownership`] | Institutional holders and insider trades |
//! | [`Ticker`] | Screener row tagged with its exchange |
//! | [`Symbol`] | Validated ticker symbol |
//! | [`UtcDateTime`] / [`TradeDate`] | Fetch timestamps and query dates |
//!
//! Every numeric field is optional: the vendor encodes numbers as strings and
//! anything unparseable becomes `None` rather than an error.

mod models;
mod symbol;
mod ticker;
mod timestamp;

pub use models::{
    AnalystData, DividendEvent, DividendSummary, Dividends, FinancialStatements, Financials,
    HistoricalPrices, InsiderTrade, Institutional, InstitutionalHolder, InstitutionalSummary,
    KeyMetrics, Metadata, News, NewsArticle, NormalizedSymbolRecord, Ownership, PressRelease,
    PriceBar, PriceRange, Quote, QuoteSnapshot, RatioRow, SecFiling, ShortInterest, StatementRow,
};
pub use symbol::Symbol;
pub use ticker::{Exchange, Ticker};
pub use timestamp::{TradeDate, UtcDateTime};
