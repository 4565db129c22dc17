use crate::error::NormalizeError;
use crate::parse::{
    bool_value, number_value, percentage_value, range_value, text_value, volume_value,
};
use crate::{Category, KeyMetrics, Metadata, Quote, RawSymbolRecord};

use super::json::Node;

const SHARES_PER_MILLION: i64 = 1_000_000;

pub fn normalize_metadata(record: &RawSymbolRecord) -> Result<Metadata, NormalizeError> {
    let info = Node::category(record, Category::Info);

    Ok(Metadata {
        symbol: Some(record.symbol().to_string()),
        fetched_at: Some(record.fetched_at()),
        company_name: text_value(info.field("companyName")?),
        stock_type: text_value(info.field("stockType")?),
        exchange: text_value(info.field("exchange")?),
        asset_class: text_value(info.field("assetClass")?),
        market_status: text_value(info.field("marketStatus")?),
        is_nasdaq_listed: bool_value(info.field("isNasdaqListed")?),
        is_nasdaq_100: bool_value(info.field("isNasdaq100")?),
    })
}

/// Last sale from `info.primaryData`; previous close from `info.secondaryData`.
pub fn normalize_quote(record: &RawSymbolRecord) -> Result<Quote, NormalizeError> {
    let info = Node::category(record, Category::Info);
    let primary = info.get("primaryData")?;
    let secondary = info.get("secondaryData")?;

    Ok(Quote {
        price: number_value(primary.field("lastSalePrice")?),
        change: number_value(primary.field("netChange")?),
        change_percent: percentage_value(primary.field("percentageChange")?),
        volume: volume_value(primary.field("volume")?),
        bid: number_value(primary.field("bidPrice")?),
        ask: number_value(primary.field("askPrice")?),
        bid_size: volume_value(primary.field("bidSize")?),
        ask_size: volume_value(primary.field("askSize")?),
        previous_close: number_value(secondary.field("lastSalePrice")?),
        timestamp: text_value(primary.field("lastTradeTimestamp")?),
        is_realtime: bool_value(primary.field("isRealTime")?),
    })
}

/// Ranges come from `info.keyStats`, shares outstanding from the
/// institutional ownership summary (reported in millions).
///
/// `pe_ratio` is read from the dividends payload's `payoutRatio`, which is
/// where the vendor feed has historically carried it.
pub fn normalize_key_metrics(record: &RawSymbolRecord) -> Result<KeyMetrics, NormalizeError> {
    let key_stats = Node::category(record, Category::Info).get("keyStats")?;
    let dividends = Node::category(record, Category::Dividends);

    let week_52 = range_value(key_stats.at(&["fiftyTwoWeekHighLow", "value"])?.value());
    let day = range_value(key_stats.at(&["dayrange", "value"])?.value());

    let shares_outstanding_millions = volume_value(
        Node::category(record, Category::InstitutionalHoldings)
            .at(&["ownershipSummary", "ShareoutstandingTotal", "value"])?
            .value(),
    );

    Ok(KeyMetrics {
        pe_ratio: number_value(dividends.field("payoutRatio")?),
        week_52_high: week_52.and_then(|range| range.high),
        week_52_low: week_52.and_then(|range| range.low),
        day_high: day.and_then(|range| range.high),
        day_low: day.and_then(|range| range.low),
        dividend_yield: percentage_value(dividends.field("yield")?),
        shares_outstanding: shares_outstanding_millions
            .and_then(|millions| millions.checked_mul(SHARES_PER_MILLION)),
        shares_outstanding_millions,
    })
}
