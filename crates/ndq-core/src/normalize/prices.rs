use crate::error::NormalizeError;
use crate::parse::{number_value, text_value, volume_value};
use crate::{Category, HistoricalPrices, PriceBar, RawSymbolRecord};

use super::json::Node;

/// Daily bars from `historical.tradesTable.rows`; the 5-day and 1-month
/// windows from the intraday `nocp` payloads.
pub fn normalize_historical_prices(
    record: &RawSymbolRecord,
) -> Result<HistoricalPrices, NormalizeError> {
    let daily = Node::category(record, Category::Historical).at(&["tradesTable", "rows"])?;

    Ok(HistoricalPrices {
        daily: price_bars(&daily)?,
        period_5d: nocp_bars(&Node::category(record, Category::Historical5d))?,
        period_1m: nocp_bars(&Node::category(record, Category::Historical1m))?,
    })
}

/// `nocp.rows` when present, otherwise the `nocp.nocpTable` series.
fn nocp_bars(payload: &Node<'_>) -> Result<Vec<PriceBar>, NormalizeError> {
    let nocp = payload.get("nocp")?;
    let rows = nocp.get("rows")?;
    if rows.is_present() {
        return price_bars(&rows);
    }

    nocp.get("nocpTable")?
        .items()?
        .iter()
        .map(|row| -> Result<PriceBar, NormalizeError> {
            let close = match row.field("close")? {
                Some(close) => number_value(Some(close)),
                None => number_value(row.field("price")?),
            };
            Ok(PriceBar {
                date: text_value(row.field("date")?),
                close,
                ..PriceBar::default()
            })
        })
        .collect()
}

fn price_bars(rows: &Node<'_>) -> Result<Vec<PriceBar>, NormalizeError> {
    rows.items()?
        .iter()
        .map(|row| -> Result<PriceBar, NormalizeError> {
            Ok(PriceBar {
                date: text_value(row.field("date")?),
                open: number_value(row.field("open")?),
                high: number_value(row.field("high")?),
                low: number_value(row.field("low")?),
                close: number_value(row.field("close")?),
                volume: volume_value(row.field("volume")?),
            })
        })
        .collect()
}
