//! # Normalization
//!
//! Pure mappers from a [`RawSymbolRecord`] to the sections of a
//! [`NormalizedSymbolRecord`].
//!
//! | Section | Mapper | Reads |
//! |---------|--------|-------|
//! | metadata | [`normalize_metadata`] | info |
//! | quote | [`normalize_quote`] | info |
//! | key_metrics | [`normalize_key_metrics`] | info, dividends, institutional_holdings |
//! | dividends | [`normalize_dividends`] | dividends |
//! | historical_prices | [`normalize_historical_prices`] | historical, historical_5d, historical_1m |
//! | financials | [`normalize_financials`] | financials_annual, financials_quarterly |
//! | ownership | [`normalize_ownership`] | institutional_holdings, insider_trades |
//! | analyst_data | [`normalize_analyst_data`] | peg_ratio |
//! | short_interest | [`normalize_short_interest`] | short_interest |
//! | sec_filings | [`normalize_sec_filings`] | sec_filings |
//! | news | [`normalize_news`] | press_releases, news_articles |
//!
//! Each mapper fails only when a payload has the wrong JSON shape.
//! [`normalize_symbol_data`] runs every mapper in isolation and substitutes
//! the section default on failure.

mod analyst;
mod dividends;
mod financials;
mod json;
mod news;
mod ownership;
mod prices;
mod quote;

pub use analyst::{normalize_analyst_data, normalize_short_interest};
pub use dividends::normalize_dividends;
pub use financials::normalize_financials;
pub use news::{normalize_news, normalize_sec_filings, related_symbols};
pub use ownership::{normalize_ownership, MAX_INSIDER_TRADES, MAX_TOP_HOLDERS};
pub use prices::normalize_historical_prices;
pub use quote::{normalize_key_metrics, normalize_metadata, normalize_quote};

use crate::error::NormalizeError;
use crate::{NormalizedSymbolRecord, RawSymbolRecord};

/// Normalize every section. Never fails.
pub fn normalize_symbol_data(record: &RawSymbolRecord) -> NormalizedSymbolRecord {
    NormalizedSymbolRecord {
        metadata: isolate("metadata", record, normalize_metadata),
        quote: isolate("quote", record, normalize_quote),
        key_metrics: isolate("key_metrics", record, normalize_key_metrics),
        dividends: isolate("dividends", record, normalize_dividends),
        historical_prices: isolate("historical_prices", record, normalize_historical_prices),
        financials: isolate("financials", record, normalize_financials),
        ownership: isolate("ownership", record, normalize_ownership),
        analyst_data: isolate("analyst_data", record, normalize_analyst_data),
        short_interest: isolate("short_interest", record, normalize_short_interest),
        sec_filings: isolate("sec_filings", record, normalize_sec_filings),
        news: isolate("news", record, normalize_news),
    }
}

/// Run one mapper, falling back to the section default on a shape error.
pub(crate) fn isolate<T, F>(section: &'static str, record: &RawSymbolRecord, mapper: F) -> T
where
    T: Default,
    F: FnOnce(&RawSymbolRecord) -> Result<T, NormalizeError>,
{
    match mapper(record) {
        Ok(value) => value,
        Err(error) => {
            tracing::error!(
                section,
                symbol = %record.symbol(),
                error = %error,
                "section normalization failed, using empty default"
            );
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Symbol, UtcDateTime};
    use serde_json::json;

    #[test]
    fn malformed_section_degrades_alone() {
        let record = RawSymbolRecord::new(
            Symbol::parse("AAPL").expect("valid symbol"),
            UtcDateTime::parse("2024-05-01T12:00:00Z").expect("valid timestamp"),
        )
        .with_payload(Category::Info, json!({"primaryData": {"lastSalePrice": "$1.00"}}))
        .with_payload(Category::FinancialsAnnual, json!({"incomeStatementTable": []}));

        let normalized = normalize_symbol_data(&record);
        assert_eq!(normalized.financials, Default::default());
        assert_eq!(normalized.quote.price, Some(1.0));
    }
}
