//! # ndq Core
//!
//! Fetches the public NASDAQ market-data endpoints and reshapes the vendor's
//! loosely typed JSON into a stable schema.
//!
//! ## Overview
//!
//! - **Fetch layer** issuing one request per data category, concurrently
//! - **Raw composite record** holding every category payload for a symbol
//! - **Normalization** of string-encoded prices, percentages and ranges into
//!   eleven typed sections, each isolated from failures in the others
//! - **Screener** utilities for exchange-wide ticker lists
//! - **High-level client** with one getter per topic
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`category`] | The 14 vendor data categories |
//! | [`client`] | `NasdaqClient` and its query types |
//! | [`config`] | Timeouts, user agent and base URLs |
//! | [`domain`] | Symbols, dates and normalized section types |
//! | [`endpoints`] | Vendor URL templates |
//! | [`error`] | Validation, normalization and I/O errors |
//! | [`fetch`] | Per-category requests and the aggregate fetch |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`normalize`] | Section mappers and the orchestrator |
//! | [`parse`] | Scalar parsing of vendor strings |
//! | [`persist`] | JSON file output |
//! | [`raw`] | Raw composite record |
//! | [`screener`] | Exchange ticker lists |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ndq_core::{NasdaqClient, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NasdaqClient::from_env();
//!     let symbol = Symbol::parse("AAPL")?;
//!
//!     let quote = client.get_quote(&symbol).await;
//!     println!("{:?} last sale: {:?}", quote.company_name, quote.quote.price);
//!
//!     let record = client.fetch_normalized(&symbol).await;
//!     println!("{} filings", record.sec_filings.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Only caller input is rejected with an error. Network and payload problems
//! are logged through `tracing` and surface as absent data:
//!
//! ```rust
//! use ndq_core::{Symbol, ValidationError};
//!
//! assert!(matches!(Symbol::parse("  "), Err(ValidationError::EmptySymbol)));
//! ```

pub mod category;
pub mod client;
pub mod config;
pub mod domain;
pub mod endpoints;
pub mod error;
pub mod fetch;
pub mod http_client;
pub mod normalize;
pub mod parse;
pub mod persist;
pub mod raw;
pub mod screener;

pub use category::Category;

pub use client::{DataSet, HistoricalQuery, HistoryPeriod, NasdaqClient, SymbolData};

pub use config::ClientConfig;

pub use domain::{
    AnalystData, DividendEvent, DividendSummary, Dividends, Exchange, FinancialStatements,
    Financials, HistoricalPrices, InsiderTrade, Institutional, InstitutionalHolder,
    InstitutionalSummary, KeyMetrics, Metadata, News, NewsArticle, NormalizedSymbolRecord,
    Ownership, PressRelease, PriceBar, PriceRange, Quote, QuoteSnapshot, RatioRow, SecFiling,
    ShortInterest, StatementRow, Symbol, Ticker, TradeDate, UtcDateTime,
};

pub use endpoints::Endpoints;

pub use error::{CoreError, NormalizeError, ValidationError};

pub use fetch::{
    FetchError, FetchErrorKind, Fetcher, FinancialPeriod, HistoricalParams, HoldingsParams,
    InsiderParams, NewsParams, NocpTimeframe, QuoteParams, SecFilingsParams,
};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use normalize::normalize_symbol_data;

pub use persist::{read_json_file, write_json_file};

pub use raw::RawSymbolRecord;

pub use screener::{unique_symbols, ScreenerError};
