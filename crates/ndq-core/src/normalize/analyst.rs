use crate::error::NormalizeError;
use crate::parse::{number_value, text_value, volume_value};
use crate::{AnalystData, Category, RawSymbolRecord, ShortInterest};

use super::json::Node;

/// PEG, P/E and growth from the `peg_ratio` payload.
///
/// Vendor-coupled: P/E is the first `per.peRatioChart` point whose `x` label
/// contains `"Actual"`, and growth is the last `gr.peGrowthChart` point. The
/// feed documents neither convention.
pub fn normalize_analyst_data(record: &RawSymbolRecord) -> Result<AnalystData, NormalizeError> {
    let payload = Node::category(record, Category::PegRatio);

    let peg_ratio = number_value(payload.at(&["pegr", "pegValue"])?.value());

    let mut pe_ratio = None;
    for point in payload.at(&["per", "peRatioChart"])?.items()? {
        let is_actual = text_value(point.field("x")?).is_some_and(|label| label.contains("Actual"));
        if is_actual {
            pe_ratio = number_value(point.field("y")?);
            break;
        }
    }

    let growth_rate = match payload.at(&["gr", "peGrowthChart"])?.items()?.last() {
        Some(point) => number_value(point.field("y")?),
        None => None,
    };

    Ok(AnalystData {
        peg_ratio,
        pe_ratio,
        growth_rate,
    })
}

/// Only the most recent settlement row, `shortInterestTable.rows[0]`.
pub fn normalize_short_interest(
    record: &RawSymbolRecord,
) -> Result<ShortInterest, NormalizeError> {
    let rows = Node::category(record, Category::ShortInterest)
        .at(&["shortInterestTable", "rows"])?
        .items()?;

    let Some(latest) = rows.first() else {
        return Ok(ShortInterest::default());
    };

    Ok(ShortInterest {
        settlement_date: text_value(latest.field("settlementDate")?),
        shares_short: volume_value(latest.field("shortInterest")?),
        avg_daily_volume: volume_value(latest.field("avgDailyShareVolume")?),
        days_to_cover: number_value(latest.field("daysToCover")?),
    })
}
