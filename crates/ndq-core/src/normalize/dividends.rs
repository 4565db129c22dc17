use crate::error::NormalizeError;
use crate::parse::{number_value, percentage_value, text_value};
use crate::{Category, DividendEvent, DividendSummary, Dividends, RawSymbolRecord};

use super::json::Node;

pub fn normalize_dividends(record: &RawSymbolRecord) -> Result<Dividends, NormalizeError> {
    let payload = Node::category(record, Category::Dividends);

    let summary = DividendSummary {
        dividend_yield: percentage_value(payload.field("yield")?),
        annual_amount: number_value(payload.field("annualizedDividend")?),
        payout_ratio: percentage_value(payload.field("payoutRatio")?),
        ex_dividend_date: text_value(payload.field("exDividendDate")?),
        payment_date: text_value(payload.field("dividendPaymentDate")?),
    };

    let history = payload
        .at(&["dividends", "rows"])?
        .items()?
        .iter()
        .map(|row| -> Result<DividendEvent, NormalizeError> {
            Ok(DividendEvent {
                ex_date: text_value(row.field("exOrEffDate")?),
                amount: number_value(row.field("amount")?),
                kind: text_value(row.field("type")?).map(|kind| kind.to_lowercase()),
                declaration_date: text_value(row.field("declarationDate")?),
                record_date: text_value(row.field("recordDate")?),
                payment_date: text_value(row.field("paymentDate")?),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dividends { summary, history })
}
